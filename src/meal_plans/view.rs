use time::Date;
use tracing::{error, info, instrument, warn};

use super::slot::{MealSlot, Planned};
use crate::api::{CookbookApi, MealPlan};
use crate::error::{ApiError, FormError, ViewError};
use crate::loading::{DateSelection, LoadTicket};
use crate::state::AppState;

pub const MEAL_ADDED: &str = "Meal added to plan!";
pub const MEAL_ADD_FAILED: &str = "Failed to add meal to plan.";

#[derive(Debug)]
pub struct MealPlanningView {
    selection: DateSelection,
    plan: MealPlan,
    pub dialog_open: bool,
    pub chosen_slot: MealSlot,
    pub chosen_recipe: Option<String>,
}

impl MealPlanningView {
    /// A freshly mounted view. Call [`select_date`](Self::select_date) to load.
    pub fn new(date: Date) -> Self {
        Self {
            selection: DateSelection::new(date),
            plan: MealPlan::empty(date),
            dialog_open: false,
            chosen_slot: MealSlot::Breakfast,
            chosen_recipe: None,
        }
    }

    pub fn selected_date(&self) -> Date {
        self.selection.selected()
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    /// Switches date and drops the old plan straight away.
    pub fn begin_load(&mut self, date: Date) -> LoadTicket {
        self.plan = MealPlan::empty(date);
        self.selection.select(date)
    }

    /// Applies a fetch result. Returns `false` when the ticket is stale.
    /// Any failure, including a missing record, leaves an empty plan.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<MealPlan, ApiError>) -> bool {
        if !self.selection.is_current(&ticket) {
            warn!(date = %ticket.date, "discarding stale meal plan response");
            return false;
        }
        self.plan = match result {
            Ok(mut plan) => {
                plan.date = ticket.date;
                plan
            }
            Err(e) => {
                if !e.is_not_found() {
                    warn!(error = %e, date = %ticket.date, "loading meal plan failed");
                }
                MealPlan::empty(ticket.date)
            }
        };
        true
    }

    #[instrument(skip(self, api))]
    pub async fn select_date(&mut self, api: &dyn CookbookApi, date: Date) {
        let ticket = self.begin_load(date);
        let result = api.get_meal_plan(date).await;
        self.finish_load(ticket, result);
    }

    /// Merges the chosen recipe into the loaded plan and upserts the whole
    /// record. The local plan only changes once the backend accepted it.
    #[instrument(skip(self, api, state), fields(date = %self.selected_date(), slot = %self.chosen_slot))]
    pub async fn add_meal(
        &mut self,
        api: &dyn CookbookApi,
        state: &mut AppState,
    ) -> Result<(), ViewError> {
        let recipe_id = self
            .chosen_recipe
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(FormError::Missing("recipe"))?;

        let mut merged = self.plan.clone();
        merged.date = self.selected_date();
        merged.assign(self.chosen_slot, &recipe_id);

        match api.upsert_meal_plan(&merged).await {
            Ok(()) => {
                info!(%recipe_id, "meal planned");
                self.plan = merged;
                self.dialog_open = false;
                self.chosen_recipe = None;
                state.notices.success(MEAL_ADDED);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "upsert meal plan failed");
                state.notices.error(MEAL_ADD_FAILED);
                Err(e.into())
            }
        }
    }

    pub fn slot<'a>(&self, slot: MealSlot, state: &'a AppState) -> Vec<Planned<'a>> {
        self.plan.resolve(slot, &state.recipes)
    }
}
