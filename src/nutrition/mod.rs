mod form;
mod view;

pub use form::{parse_servings, NutritionForm};
pub use view::{NutritionView, ANALYSIS_UNAVAILABLE, LOGGED, LOG_FAILED};
