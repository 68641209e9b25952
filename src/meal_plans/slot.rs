use std::fmt;
use std::str::FromStr;

use crate::api::{MealPlan, Recipe};
use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" | "snacks" => Ok(MealSlot::Snacks),
            _ => Err(FormError::UnknownVariant {
                kind: "meal slot",
                value: s.to_string(),
            }),
        }
    }
}

/// What a slot shows: a known recipe, or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Planned<'a> {
    Empty,
    Recipe(&'a Recipe),
}

impl MealPlan {
    /// Snacks accumulate in insertion order, duplicates included. Every other
    /// slot holds one recipe and is overwritten.
    pub fn assign(&mut self, slot: MealSlot, recipe_id: &str) {
        let id = recipe_id.to_string();
        match slot {
            MealSlot::Breakfast => self.breakfast = Some(id),
            MealSlot::Lunch => self.lunch = Some(id),
            MealSlot::Dinner => self.dinner = Some(id),
            MealSlot::Snacks => self.snacks.push(id),
        }
    }

    /// One entry per single slot (placeholder when unset or unknown), one per
    /// snack, nothing when there are no snacks.
    pub fn resolve<'a>(&self, slot: MealSlot, recipes: &'a [Recipe]) -> Vec<Planned<'a>> {
        let lookup = move |id: &String| match recipes.iter().find(|r| &r.id == id) {
            Some(recipe) => Planned::Recipe(recipe),
            None => Planned::Empty,
        };
        let single = move |id: &Option<String>| vec![id.as_ref().map_or(Planned::Empty, lookup)];
        match slot {
            MealSlot::Breakfast => single(&self.breakfast),
            MealSlot::Lunch => single(&self.lunch),
            MealSlot::Dinner => single(&self.dinner),
            MealSlot::Snacks => self.snacks.iter().map(lookup).collect(),
        }
    }
}
