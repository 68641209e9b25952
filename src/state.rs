use time::Date;
use tracing::{error, info, warn};

use crate::api::{CookbookApi, NutritionLog, Recipe};
use crate::notify::Notices;

pub const LOAD_FAILED: &str = "Failed to load app data. Please refresh the page.";

/// Data shared by every view. Survives navigation; views borrow it.
#[derive(Debug, Default)]
pub struct AppState {
    pub recipes: Vec<Recipe>,
    /// `None` until the startup load got that far.
    pub today_nutrition: Option<NutritionLog>,
    pub notices: Notices,
}

impl AppState {
    /// Seed, then recipes, then today's nutrition. Each step needs the previous
    /// one to have succeeded, except that a missing nutrition log becomes an
    /// empty one. Never fails: problems surface as a notice.
    pub async fn bootstrap(api: &dyn CookbookApi, today: Date) -> Self {
        let mut state = Self::default();

        if let Err(e) = api.seed_sample_data().await {
            error!(error = %e, "seeding sample data failed");
            state.notices.error(LOAD_FAILED);
            return state;
        }

        match api.list_recipes().await {
            Ok(recipes) => state.recipes = recipes,
            Err(e) => {
                error!(error = %e, "loading recipes failed");
                state.notices.error(LOAD_FAILED);
                return state;
            }
        }

        let nutrition = match api.get_nutrition_log(today).await {
            Ok(log) => log,
            Err(e) => {
                warn!(error = %e, %today, "no nutrition log for today; using empty totals");
                NutritionLog::empty(today)
            }
        };
        state.today_nutrition = Some(nutrition);

        info!(recipes = state.recipes.len(), "app data loaded");
        state
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn today_calories(&self) -> f64 {
        self.today_nutrition
            .as_ref()
            .map(|n| n.totals.calories)
            .unwrap_or_default()
    }
}
