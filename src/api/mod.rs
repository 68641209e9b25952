pub mod dto;
mod http;

use async_trait::async_trait;
use time::Date;

use crate::error::ApiError;

pub use dto::*;
pub use http::HttpApi;

/// The backend surface the views are written against.
///
/// Every call is a single request: no retry, no caching. Implementations map a
/// 404 to [`ApiError::NotFound`] so callers can tell absence from failure.
#[async_trait]
pub trait CookbookApi: Send + Sync {
    /// Idempotent, best effort. Called once at startup.
    async fn seed_sample_data(&self) -> Result<(), ApiError>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError>;
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError>;
    async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError>;

    async fn get_meal_plan(&self, date: Date) -> Result<MealPlan, ApiError>;
    /// Overwrites the whole record for `plan.date`.
    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), ApiError>;

    async fn get_nutrition_log(&self, date: Date) -> Result<NutritionLog, ApiError>;
    async fn append_nutrition_log(&self, entry: &NewNutritionEntry) -> Result<(), ApiError>;
    async fn analyze_nutrition(
        &self,
        request: &NutritionAnalysisRequest,
    ) -> Result<NutritionAnalysis, ApiError>;

    async fn send_chat_message(&self, session_id: &str, text: &str)
        -> Result<ChatReply, ApiError>;
    async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatExchange>, ApiError>;
}
