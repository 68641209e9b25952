use time::Date;
use tracing::{error, info, instrument, warn};

use super::form::NutritionForm;
use crate::api::{
    CookbookApi, NutritionAnalysisRequest, NutritionEntry, NutritionGoals, NutritionLog, Recipe,
};
use crate::error::{ApiError, ViewError};
use crate::loading::{DateSelection, LoadTicket};
use crate::state::AppState;

pub const LOGGED: &str = "Nutrition logged successfully!";
pub const LOG_FAILED: &str = "Failed to log nutrition.";
pub const ANALYSIS_UNAVAILABLE: &str =
    "Unable to analyze nutrition data at the moment. Please try again later.";

#[derive(Debug)]
pub struct NutritionView {
    selection: DateSelection,
    log: NutritionLog,
    pub dialog_open: bool,
    pub form: NutritionForm,
}

impl NutritionView {
    pub fn new(date: Date) -> Self {
        Self {
            selection: DateSelection::new(date),
            log: NutritionLog::empty(date),
            dialog_open: false,
            form: NutritionForm::default(),
        }
    }

    pub fn selected_date(&self) -> Date {
        self.selection.selected()
    }

    /// Exactly what the server reported; totals are never recomputed here.
    pub fn log(&self) -> &NutritionLog {
        &self.log
    }

    pub fn begin_load(&mut self, date: Date) -> LoadTicket {
        self.log = NutritionLog::empty(date);
        self.selection.select(date)
    }

    /// Returns `false` and changes nothing when the ticket is stale.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<NutritionLog, ApiError>,
    ) -> bool {
        if !self.selection.is_current(&ticket) {
            warn!(date = %ticket.date, "discarding stale nutrition response");
            return false;
        }
        self.log = match result {
            Ok(mut log) => {
                log.date = ticket.date;
                log
            }
            Err(e) => {
                if !e.is_not_found() {
                    warn!(error = %e, date = %ticket.date, "loading nutrition log failed");
                }
                NutritionLog::empty(ticket.date)
            }
        };
        true
    }

    #[instrument(skip(self, api))]
    pub async fn select_date(&mut self, api: &dyn CookbookApi, date: Date) {
        let ticket = self.begin_load(date);
        let result = api.get_nutrition_log(date).await;
        self.finish_load(ticket, result);
    }

    /// Posts the form for the selected date, then re-fetches the whole day so
    /// the totals shown are the server's.
    #[instrument(skip(self, api, state), fields(date = %self.selected_date()))]
    pub async fn log_entry(
        &mut self,
        api: &dyn CookbookApi,
        state: &mut AppState,
    ) -> Result<(), ViewError> {
        let date = self.selected_date();
        let entry = self.form.normalize(date)?;

        if let Err(e) = api.append_nutrition_log(&entry).await {
            error!(error = %e, "append nutrition log failed");
            state.notices.error(LOG_FAILED);
            return Err(e.into());
        }
        info!(recipe_id = %entry.recipe_id, servings = entry.servings, "nutrition logged");

        let ticket = self.begin_load(date);
        let refetched = api.get_nutrition_log(date).await;
        let fresh = refetched.is_ok();
        // The shared snapshot only takes server data, never a fallback.
        if self.finish_load(ticket, refetched) && fresh {
            if let Some(today) = state.today_nutrition.as_mut() {
                if today.date == date {
                    *today = self.log.clone();
                }
            }
        }

        self.dialog_open = false;
        self.form = NutritionForm::default();
        state.notices.success(LOGGED);
        Ok(())
    }

    /// Asks the assistant to review the day's totals against `goals`. Never
    /// fails: an unavailable service yields a fixed message.
    #[instrument(skip(self, api))]
    pub async fn analyze(&self, api: &dyn CookbookApi, goals: NutritionGoals) -> String {
        let request = NutritionAnalysisRequest {
            nutrition_data: self.log.totals,
            goals,
        };
        match api.analyze_nutrition(&request).await {
            Ok(analysis) => analysis.analysis,
            Err(e) => {
                warn!(error = %e, "nutrition analysis failed");
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Entries paired with their recipe when it is known locally.
    pub fn entries<'a>(&'a self, state: &'a AppState) -> Vec<(&'a NutritionEntry, Option<&'a Recipe>)> {
        self.log
            .logs
            .iter()
            .map(|entry| (entry, state.recipe(&entry.recipe_id)))
            .collect()
    }
}
