use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::FormError;

/// Calendar dates travel as `YYYY-MM-DD`.
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub fn parse_date(raw: &str) -> Result<Date, FormError> {
    Date::parse(raw.trim(), ISO_DATE).map_err(|_| FormError::InvalidDate(raw.to_string()))
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Anything else the backend holds. Never offered as a filter choice.
    #[serde(other)]
    Other,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snack,
        Category::Dessert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
            Category::Other => "Other",
        }
    }
}

/// What a nutrition log entry was eaten as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

macro_rules! case_insensitive_from_str {
    ($ty:ty, $kind:literal, [$($variant:path),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| FormError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

case_insensitive_from_str!(
    Difficulty,
    "difficulty",
    [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
);
case_insensitive_from_str!(
    Category,
    "category",
    [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snack,
        Category::Dessert,
    ]
);
case_insensitive_from_str!(
    MealType,
    "meal type",
    [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ]
);

/// Calories and macros, either per serving or as a daily total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub category: Category,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// Body of `POST /recipes`, already normalized from the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub category: Category,
    pub nutrition: Nutrition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One date's slot assignments. Always sent whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
    #[serde(default)]
    pub snacks: Vec<String>,
}

impl MealPlan {
    pub fn empty(date: Date) -> Self {
        Self {
            id: None,
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
            snacks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_none()
            && self.lunch.is_none()
            && self.dinner.is_none()
            && self.snacks.is_empty()
    }
}

/// A recorded consumption, scaled by the server to the logged servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meal_type: MealType,
    pub recipe_id: String,
    pub servings: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

/// Body of `POST /nutrition-logs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNutritionEntry {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub recipe_id: String,
    pub servings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionLog {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default)]
    pub logs: Vec<NutritionEntry>,
    #[serde(default)]
    pub totals: Nutrition,
}

impl NutritionLog {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            logs: Vec::new(),
            totals: Nutrition::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// A stored exchange returned by the chat history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatExchange {
    pub session_id: String,
    pub message: String,
    pub response: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionGoals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionAnalysisRequest {
    pub nutrition_data: Nutrition,
    pub goals: NutritionGoals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionAnalysis {
    pub analysis: String,
}
