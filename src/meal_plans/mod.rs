mod slot;
mod view;

pub use slot::{MealSlot, Planned};
pub use view::{MealPlanningView, MEAL_ADDED, MEAL_ADD_FAILED};
