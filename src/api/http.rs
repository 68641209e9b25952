use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use time::Date;
use tracing::{debug, instrument};

use super::dto::*;
use super::CookbookApi;
use crate::config::AppConfig;
use crate::error::ApiError;

/// `CookbookApi` over HTTP against `<backend_url>/api`.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    api: Url,
    chat_timeout: Duration,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let trimmed = config.backend_url.trim().trim_end_matches('/');
        let api = Url::parse(&format!("{trimmed}/api"))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.backend_url)))?;
        if api.cannot_be_a_base() || !matches!(api.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(config.backend_url.clone()));
        }
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            api,
            chat_timeout: config.chat_timeout,
        })
    }

    /// Base of the REST surface, e.g. `http://host:8001/api`.
    pub fn api_url(&self) -> &Url {
        &self.api
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.api.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.api.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(response.url().path().to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CookbookApi for HttpApi {
    #[instrument(skip(self))]
    async fn seed_sample_data(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["init-sample-data"])?;
        debug!(%url, "seeding sample data");
        Self::check(self.client.post(url).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let url = self.endpoint(&["recipes"])?;
        Self::read(self.client.get(url).send().await?).await
    }

    #[instrument(skip(self))]
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError> {
        let url = self.endpoint(&["recipes", id])?;
        Self::read(self.client.get(url).send().await?).await
    }

    #[instrument(skip(self, recipe), fields(name = %recipe.name))]
    async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        let url = self.endpoint(&["recipes"])?;
        Self::read(self.client.post(url).json(recipe).send().await?).await
    }

    #[instrument(skip(self))]
    async fn get_meal_plan(&self, date: Date) -> Result<MealPlan, ApiError> {
        let url = self.endpoint(&["meal-plans", &date.to_string()])?;
        Self::read(self.client.get(url).send().await?).await
    }

    #[instrument(skip(self, plan), fields(date = %plan.date))]
    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), ApiError> {
        let url = self.endpoint(&["meal-plans"])?;
        Self::check(self.client.post(url).json(plan).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_nutrition_log(&self, date: Date) -> Result<NutritionLog, ApiError> {
        let url = self.endpoint(&["nutrition-logs", &date.to_string()])?;
        Self::read(self.client.get(url).send().await?).await
    }

    #[instrument(skip(self, entry), fields(date = %entry.date, recipe_id = %entry.recipe_id))]
    async fn append_nutrition_log(&self, entry: &NewNutritionEntry) -> Result<(), ApiError> {
        let url = self.endpoint(&["nutrition-logs"])?;
        Self::check(self.client.post(url).json(entry).send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self, request))]
    async fn analyze_nutrition(
        &self,
        request: &NutritionAnalysisRequest,
    ) -> Result<NutritionAnalysis, ApiError> {
        let url = self.endpoint(&["ai-nutrition-analysis"])?;
        let response = self
            .client
            .post(url)
            .timeout(self.chat_timeout)
            .json(request)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, text))]
    async fn send_chat_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ChatReply, ApiError> {
        let url = self.endpoint(&["ai-chat"])?;
        let body = ChatRequest {
            session_id,
            message: text,
        };
        let response = self
            .client
            .post(url)
            .timeout(self.chat_timeout)
            .json(&body)
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self))]
    async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatExchange>, ApiError> {
        let url = self.endpoint(&["ai-chat", session_id])?;
        Self::read(self.client.get(url).send().await?).await
    }
}
