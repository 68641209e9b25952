use std::fmt;
use std::str::FromStr;

use time::Date;
use tracing::debug;

use crate::api::CookbookApi;
use crate::assistant::ChatSession;
use crate::error::FormError;
use crate::meal_plans::MealPlanningView;
use crate::nutrition::NutritionView;
use crate::recipes::RecipesView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    #[default]
    Dashboard,
    Recipes,
    MealPlanning,
    Nutrition,
    AiAssistant,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::Dashboard,
        ViewId::Recipes,
        ViewId::MealPlanning,
        ViewId::Nutrition,
        ViewId::AiAssistant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::Recipes => "recipes",
            ViewId::MealPlanning => "meal-planning",
            ViewId::Nutrition => "nutrition",
            ViewId::AiAssistant => "ai-assistant",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| FormError::UnknownVariant {
                kind: "view",
                value: s.to_string(),
            })
    }
}

/// A mounted view with its local state.
#[derive(Debug)]
pub enum ActiveView {
    Dashboard,
    Recipes(RecipesView),
    MealPlanning(MealPlanningView),
    Nutrition(NutritionView),
    AiAssistant(ChatSession),
}

impl ActiveView {
    pub fn mount(id: ViewId, today: Date) -> Self {
        match id {
            ViewId::Dashboard => ActiveView::Dashboard,
            ViewId::Recipes => ActiveView::Recipes(RecipesView::default()),
            ViewId::MealPlanning => ActiveView::MealPlanning(MealPlanningView::new(today)),
            ViewId::Nutrition => ActiveView::Nutrition(NutritionView::new(today)),
            ViewId::AiAssistant => ActiveView::AiAssistant(ChatSession::new()),
        }
    }

    pub fn id(&self) -> ViewId {
        match self {
            ActiveView::Dashboard => ViewId::Dashboard,
            ActiveView::Recipes(_) => ViewId::Recipes,
            ActiveView::MealPlanning(_) => ViewId::MealPlanning,
            ActiveView::Nutrition(_) => ViewId::Nutrition,
            ActiveView::AiAssistant(_) => ViewId::AiAssistant,
        }
    }
}

/// Owns only the active view. Shared data lives in `AppState` and is never
/// touched by navigation.
#[derive(Debug)]
pub struct Router {
    today: Date,
    active: ActiveView,
}

impl Router {
    pub fn new(today: Date) -> Self {
        Self {
            today,
            active: ActiveView::Dashboard,
        }
    }

    pub fn current(&self) -> ViewId {
        self.active.id()
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveView {
        &mut self.active
    }

    /// Mounts a fresh instance of `id`. Returns `false` if it was already
    /// showing, in which case its state is kept.
    pub fn navigate(&mut self, id: ViewId) -> bool {
        if self.current() == id {
            return false;
        }
        debug!(from = %self.current(), to = %id, "navigate");
        self.active = ActiveView::mount(id, self.today);
        true
    }

    /// The initial fetch a freshly mounted dated view needs.
    pub async fn load_active(&mut self, api: &dyn CookbookApi) {
        match &mut self.active {
            ActiveView::MealPlanning(view) => {
                let date = view.selected_date();
                view.select_date(api, date).await;
            }
            ActiveView::Nutrition(view) => {
                let date = view.selected_date();
                view.select_date(api, date).await;
            }
            ActiveView::Dashboard | ActiveView::Recipes(_) | ActiveView::AiAssistant(_) => {}
        }
    }
}
