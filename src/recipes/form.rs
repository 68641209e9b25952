use crate::api::{Category, Difficulty, NewRecipe, Nutrition};
use crate::error::FormError;

/// The add-recipe form exactly as typed. Nothing is parsed until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub image_url: String,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            servings: String::new(),
            difficulty: Difficulty::Easy,
            category: Category::Breakfast,
            calories: String::new(),
            protein: String::new(),
            carbs: String::new(),
            fats: String::new(),
            image_url: String::new(),
        }
    }
}

/// Non-blank lines in their original order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_whole(field: &'static str, raw: &str) -> Result<u32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Missing(field));
    }
    raw.parse::<u32>().map_err(|_| FormError::NotAnInteger {
        field,
        value: raw.to_string(),
    })
}

/// Nutrition fields are optional; anything unusable counts as zero.
fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

fn required(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(())
}

impl RecipeForm {
    /// Checks required fields and builds the request body.
    pub fn normalize(&self) -> Result<NewRecipe, FormError> {
        required("name", &self.name)?;
        required("description", &self.description)?;

        let ingredients = split_lines(&self.ingredients);
        if ingredients.is_empty() {
            return Err(FormError::Missing("ingredients"));
        }
        let instructions = split_lines(&self.instructions);
        if instructions.is_empty() {
            return Err(FormError::Missing("instructions"));
        }

        let prep_time = parse_whole("prep_time", &self.prep_time)?;
        let cook_time = parse_whole("cook_time", &self.cook_time)?;
        let servings = parse_whole("servings", &self.servings)?;
        if servings == 0 {
            return Err(FormError::InvalidServings(self.servings.clone()));
        }

        let image_url = self.image_url.trim();
        Ok(NewRecipe {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            ingredients,
            instructions,
            prep_time,
            cook_time,
            servings,
            difficulty: self.difficulty,
            category: self.category,
            nutrition: Nutrition {
                calories: parse_amount(&self.calories),
                protein: parse_amount(&self.protein),
                carbs: parse_amount(&self.carbs),
                fats: parse_amount(&self.fats),
            },
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecipeForm {
        RecipeForm {
            name: "Omelette".into(),
            description: "Folded eggs".into(),
            ingredients: "2 eggs\nbutter".into(),
            instructions: "Whisk\nCook".into(),
            prep_time: "5".into(),
            cook_time: "7".into(),
            servings: "1".into(),
            calories: "210.5".into(),
            protein: "13".into(),
            ..RecipeForm::default()
        }
    }

    #[test]
    fn blank_lines_are_dropped_and_order_kept() {
        assert_eq!(split_lines("a\nb\n\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("x\r\n  \r\ny"), vec!["x", "y"]);
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn normalize_parses_numbers_and_defaults_bad_nutrition_to_zero() {
        let mut form = filled();
        form.carbs = "lots".into();
        form.fats = "-3".into();
        let recipe = form.normalize().expect("valid form");
        assert_eq!(recipe.ingredients, vec!["2 eggs", "butter"]);
        assert_eq!(recipe.prep_time, 5);
        assert_eq!(recipe.nutrition.calories, 210.5);
        assert_eq!(recipe.nutrition.protein, 13.0);
        assert_eq!(recipe.nutrition.carbs, 0.0);
        assert_eq!(recipe.nutrition.fats, 0.0);
        assert_eq!(recipe.image_url, None);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.category, Category::Breakfast);
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut form = filled();
        form.name = "  ".into();
        assert_eq!(form.normalize(), Err(FormError::Missing("name")));

        let mut form = filled();
        form.ingredients = "\n \n".into();
        assert_eq!(form.normalize(), Err(FormError::Missing("ingredients")));

        let mut form = filled();
        form.cook_time = String::new();
        assert_eq!(form.normalize(), Err(FormError::Missing("cook_time")));
    }

    #[test]
    fn integer_fields_must_parse() {
        let mut form = filled();
        form.prep_time = "ten".into();
        assert!(matches!(
            form.normalize(),
            Err(FormError::NotAnInteger { field: "prep_time", .. })
        ));

        let mut form = filled();
        form.servings = "0".into();
        assert_eq!(form.normalize(), Err(FormError::InvalidServings("0".into())));
    }

    #[test]
    fn image_url_is_kept_when_given() {
        let mut form = filled();
        form.image_url = " https://img.example/omelette.jpg ".into();
        let recipe = form.normalize().unwrap();
        assert_eq!(recipe.image_url.as_deref(), Some("https://img.example/omelette.jpg"));
    }
}
