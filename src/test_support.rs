//! In-memory doubles of the backend: `FakeApi` for view tests and an axum stub
//! server for exercising `HttpApi` over a real socket.

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::Date;

use crate::api::*;
use crate::error::ApiError;

pub fn sample_recipe(
    id: &str,
    name: &str,
    category: Category,
    difficulty: Difficulty,
    cook_time: u32,
    calories: f64,
) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        ingredients: vec!["salt".into(), "pepper".into()],
        instructions: vec!["mix".into(), "cook".into()],
        prep_time: 10,
        cook_time,
        servings: 2,
        difficulty,
        category,
        nutrition: Nutrition {
            calories,
            protein: 10.0,
            carbs: 20.0,
            fats: 5.0,
        },
        image_url: None,
        created_at: None,
    }
}

pub fn seed_recipes() -> Vec<Recipe> {
    vec![
        sample_recipe("pancakes", "Classic Pancakes", Category::Breakfast, Difficulty::Easy, 15, 320.0),
        sample_recipe("quinoa", "Quinoa Power Bowl", Category::Lunch, Difficulty::Easy, 20, 450.0),
        sample_recipe("chicken", "Herb-Crusted Chicken", Category::Dinner, Difficulty::Medium, 30, 280.0),
    ]
}

pub fn sample_new_recipe(name: &str) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        description: "quick".into(),
        ingredients: vec!["bread".into()],
        instructions: vec!["toast it".into()],
        prep_time: 1,
        cook_time: 3,
        servings: 1,
        difficulty: Difficulty::Easy,
        category: Category::Snack,
        nutrition: Nutrition {
            calories: 90.0,
            ..Nutrition::default()
        },
        image_url: None,
    }
}

fn materialize(id: String, draft: &NewRecipe) -> Recipe {
    Recipe {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        ingredients: draft.ingredients.clone(),
        instructions: draft.instructions.clone(),
        prep_time: draft.prep_time,
        cook_time: draft.cook_time,
        servings: draft.servings,
        difficulty: draft.difficulty,
        category: draft.category,
        nutrition: draft.nutrition,
        image_url: draft.image_url.clone(),
        created_at: None,
    }
}

fn scaled_entry(recipe: &Recipe, entry: &NewNutritionEntry) -> NutritionEntry {
    NutritionEntry {
        id: Some(uuid::Uuid::new_v4().to_string()),
        meal_type: entry.meal_type,
        recipe_id: entry.recipe_id.clone(),
        servings: entry.servings,
        calories: recipe.nutrition.calories * entry.servings,
        protein: recipe.nutrition.protein * entry.servings,
        carbs: recipe.nutrition.carbs * entry.servings,
        fats: recipe.nutrition.fats * entry.servings,
    }
}

fn aggregate(date: Date, logs: Vec<NutritionEntry>) -> NutritionLog {
    let totals = logs.iter().fold(Nutrition::default(), |acc, e| Nutrition {
        calories: acc.calories + e.calories,
        protein: acc.protein + e.protein,
        carbs: acc.carbs + e.carbs,
        fats: acc.fats + e.fats,
    });
    NutritionLog { date, logs, totals }
}

#[derive(Default)]
pub struct FakeInner {
    pub recipes: Vec<Recipe>,
    pub plans: HashMap<Date, MealPlan>,
    pub logs: HashMap<Date, Vec<NutritionEntry>>,
    pub failing: HashSet<&'static str>,
    pub chat_delays: VecDeque<Duration>,
    pub calls: Vec<String>,
    pub upserts: Vec<MealPlan>,
    pub chat_sessions: Vec<String>,
}

/// Programmable in-memory backend.
#[derive(Default)]
pub struct FakeApi {
    pub inner: Mutex<FakeInner>,
}

impl FakeApi {
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let fake = Self::default();
        fake.inner.lock().unwrap().recipes = recipes;
        fake
    }

    pub fn fail_on(&self, op: &'static str) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.inner.lock().unwrap().failing.remove(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn upserts(&self) -> Vec<MealPlan> {
        self.inner.lock().unwrap().upserts.clone()
    }

    pub fn put_plan(&self, plan: MealPlan) {
        self.inner.lock().unwrap().plans.insert(plan.date, plan);
    }

    pub fn queue_chat_delays(&self, delays: &[Duration]) {
        self.inner.lock().unwrap().chat_delays.extend(delays.iter().copied());
    }

    fn enter(&self, op: &'static str, detail: impl std::fmt::Display) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("{op} {detail}").trim_end().to_string());
        if inner.failing.contains(op) {
            return Err(ApiError::Status {
                status: 500,
                body: format!("{op} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CookbookApi for FakeApi {
    async fn seed_sample_data(&self) -> Result<(), ApiError> {
        self.enter("seed", "")?;
        let mut inner = self.inner.lock().unwrap();
        if inner.recipes.is_empty() {
            inner.recipes = seed_recipes();
        }
        Ok(())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.enter("list_recipes", "")?;
        Ok(self.inner.lock().unwrap().recipes.clone())
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError> {
        self.enter("get_recipe", id)?;
        self.inner
            .lock()
            .unwrap()
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/recipes/{id}")))
    }

    async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        self.enter("create_recipe", &recipe.name)?;
        let created = materialize(format!("created-{}", recipe.name), recipe);
        self.inner.lock().unwrap().recipes.push(created.clone());
        Ok(created)
    }

    async fn get_meal_plan(&self, date: Date) -> Result<MealPlan, ApiError> {
        self.enter("get_meal_plan", date)?;
        self.inner
            .lock()
            .unwrap()
            .plans
            .get(&date)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/meal-plans/{date}")))
    }

    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), ApiError> {
        self.enter("upsert_meal_plan", plan.date)?;
        let mut inner = self.inner.lock().unwrap();
        inner.upserts.push(plan.clone());
        inner.plans.insert(plan.date, plan.clone());
        Ok(())
    }

    async fn get_nutrition_log(&self, date: Date) -> Result<NutritionLog, ApiError> {
        self.enter("get_nutrition_log", date)?;
        let inner = self.inner.lock().unwrap();
        match inner.logs.get(&date) {
            Some(logs) => Ok(aggregate(date, logs.clone())),
            None => Err(ApiError::NotFound(format!("/nutrition-logs/{date}"))),
        }
    }

    async fn append_nutrition_log(&self, entry: &NewNutritionEntry) -> Result<(), ApiError> {
        self.enter("append_nutrition_log", entry.date)?;
        let mut inner = self.inner.lock().unwrap();
        let recipe = inner
            .recipes
            .iter()
            .find(|r| r.id == entry.recipe_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;
        inner
            .logs
            .entry(entry.date)
            .or_default()
            .push(scaled_entry(&recipe, entry));
        Ok(())
    }

    async fn analyze_nutrition(
        &self,
        request: &NutritionAnalysisRequest,
    ) -> Result<NutritionAnalysis, ApiError> {
        self.enter("analyze_nutrition", request.nutrition_data.calories)?;
        Ok(NutritionAnalysis {
            analysis: format!("{} kcal eaten", request.nutrition_data.calories),
        })
    }

    async fn send_chat_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ChatReply, ApiError> {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.chat_sessions.push(session_id.to_string());
            inner.chat_delays.pop_front()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter("send_chat_message", text)?;
        Ok(ChatReply {
            response: format!("echo: {text}"),
        })
    }

    async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatExchange>, ApiError> {
        self.enter("chat_history", session_id)?;
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct StubStore {
    recipes: Vec<Recipe>,
    plans: HashMap<String, MealPlan>,
    logs: HashMap<String, Vec<NutritionEntry>>,
    chats: Vec<(String, String, String)>,
}

#[derive(Default)]
struct StubState {
    store: Mutex<StubStore>,
    seed_calls: AtomicUsize,
    fail: AtomicBool,
}

type Shared = Arc<StubState>;
type Reply<T> = Result<Json<T>, StatusCode>;

/// A running axum server shaped like the real backend.
pub struct StubBackend {
    addr: SocketAddr,
    state: Shared,
}

impl StubBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn seed_calls(&self) -> usize {
        self.state.seed_calls.load(Ordering::SeqCst)
    }

    pub fn fail_everything(&self, fail: bool) {
        self.state.fail.store(fail, Ordering::SeqCst);
    }
}

fn guard(state: &Shared) -> Result<(), StatusCode> {
    if state.fail.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(())
}

async fn seed(State(state): State<Shared>) -> Reply<serde_json::Value> {
    guard(&state)?;
    state.seed_calls.fetch_add(1, Ordering::SeqCst);
    let mut store = state.store.lock().unwrap();
    if store.recipes.is_empty() {
        store.recipes = seed_recipes();
    }
    Ok(Json(serde_json::json!({ "message": "ok" })))
}

async fn list_recipes(State(state): State<Shared>) -> Reply<Vec<Recipe>> {
    guard(&state)?;
    Ok(Json(state.store.lock().unwrap().recipes.clone()))
}

async fn get_recipe(State(state): State<Shared>, Path(id): Path<String>) -> Reply<Recipe> {
    guard(&state)?;
    let store = state.store.lock().unwrap();
    store
        .recipes
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_recipe(
    State(state): State<Shared>,
    Json(body): Json<serde_json::Value>,
) -> Reply<Recipe> {
    guard(&state)?;
    let mut value = body;
    value["id"] = serde_json::Value::String(uuid::Uuid::new_v4().to_string());
    let recipe: Recipe =
        serde_json::from_value(value).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    state.store.lock().unwrap().recipes.push(recipe.clone());
    Ok(Json(recipe))
}

async fn get_plan(State(state): State<Shared>, Path(date): Path<String>) -> Reply<MealPlan> {
    guard(&state)?;
    let store = state.store.lock().unwrap();
    store.plans.get(&date).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn upsert_plan(State(state): State<Shared>, Json(plan): Json<MealPlan>) -> Reply<MealPlan> {
    guard(&state)?;
    let mut store = state.store.lock().unwrap();
    store.plans.insert(plan.date.to_string(), plan.clone());
    Ok(Json(plan))
}

async fn get_log(State(state): State<Shared>, Path(date): Path<String>) -> Reply<NutritionLog> {
    guard(&state)?;
    let day = parse_date(&date).map_err(|_| StatusCode::BAD_REQUEST)?;
    let store = state.store.lock().unwrap();
    let logs = store.logs.get(&date).cloned().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(aggregate(day, logs)))
}

#[derive(serde::Deserialize)]
struct IncomingEntry {
    date: String,
    meal_type: MealType,
    recipe_id: String,
    servings: f64,
}

async fn append_log(
    State(state): State<Shared>,
    Json(body): Json<IncomingEntry>,
) -> Reply<NutritionEntry> {
    guard(&state)?;
    let day = parse_date(&body.date).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut store = state.store.lock().unwrap();
    let recipe = store
        .recipes
        .iter()
        .find(|r| r.id == body.recipe_id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    let entry = scaled_entry(
        &recipe,
        &NewNutritionEntry {
            date: day,
            meal_type: body.meal_type,
            recipe_id: body.recipe_id,
            servings: body.servings,
        },
    );
    store.logs.entry(body.date).or_default().push(entry.clone());
    Ok(Json(entry))
}

#[derive(serde::Deserialize)]
struct IncomingChat {
    session_id: String,
    message: String,
}

async fn chat(
    State(state): State<Shared>,
    Json(body): Json<IncomingChat>,
) -> Reply<serde_json::Value> {
    guard(&state)?;
    let response = format!("You asked: {}", body.message);
    state
        .store
        .lock()
        .unwrap()
        .chats
        .push((body.session_id, body.message, response.clone()));
    Ok(Json(serde_json::json!({ "response": response })))
}

async fn chat_history(
    State(state): State<Shared>,
    Path(session_id): Path<String>,
) -> Reply<Vec<serde_json::Value>> {
    guard(&state)?;
    let store = state.store.lock().unwrap();
    let history = store
        .chats
        .iter()
        .filter(|(sid, _, _)| *sid == session_id)
        .map(|(sid, message, response)| {
            serde_json::json!({
                "session_id": sid,
                "message": message,
                "response": response,
                "timestamp": "2024-06-01T12:00:00Z",
            })
        })
        .collect();
    Ok(Json(history))
}

async fn analyze(
    State(state): State<Shared>,
    Json(body): Json<serde_json::Value>,
) -> Reply<serde_json::Value> {
    guard(&state)?;
    let calories = body["nutrition_data"]["calories"].as_f64().unwrap_or_default();
    Ok(Json(serde_json::json!({ "analysis": format!("{calories} kcal so far") })))
}

pub async fn spawn_stub_backend() -> StubBackend {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/api/init-sample-data", post(seed))
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/:id", get(get_recipe))
        .route("/api/meal-plans", post(upsert_plan))
        .route("/api/meal-plans/:date", get(get_plan))
        .route("/api/nutrition-logs", post(append_log))
        .route("/api/nutrition-logs/:date", get(get_log))
        .route("/api/ai-chat", post(chat))
        .route("/api/ai-chat/:session_id", get(chat_history))
        .route("/api/ai-nutrition-analysis", post(analyze))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend");
    });
    StubBackend { addr, state }
}
