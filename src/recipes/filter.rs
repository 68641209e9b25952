use std::fmt;
use std::str::FromStr;

use crate::api::{Category, Difficulty, Recipe};
use crate::error::FormError;

/// A single-value filter where `All` matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr<Err = FormError>> FromStr for Filter<T> {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse().map(Filter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.pad("All"),
            Filter::Only(v) => v.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub category: Filter<Category>,
    pub difficulty: Filter<Difficulty>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.category.matches(&recipe.category) && self.difficulty.matches(&recipe.difficulty)
    }

    /// Matching recipes in their original order.
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}
