use time::Date;

use crate::api::{MealType, NewNutritionEntry};
use crate::error::FormError;

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionForm {
    pub meal_type: MealType,
    pub recipe_id: Option<String>,
    /// As typed; fractional servings are fine.
    pub servings: String,
}

impl Default for NutritionForm {
    fn default() -> Self {
        Self {
            meal_type: MealType::Breakfast,
            recipe_id: None,
            servings: "1".to_string(),
        }
    }
}

pub fn parse_servings(raw: &str) -> Result<f64, FormError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(FormError::InvalidServings(raw.to_string())),
    }
}

impl NutritionForm {
    pub fn normalize(&self, date: Date) -> Result<NewNutritionEntry, FormError> {
        let recipe_id = self
            .recipe_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(FormError::Missing("recipe"))?;
        Ok(NewNutritionEntry {
            date,
            meal_type: self.meal_type,
            recipe_id: recipe_id.to_string(),
            servings: parse_servings(&self.servings)?,
        })
    }
}
