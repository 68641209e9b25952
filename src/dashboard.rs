use crate::state::AppState;

/// Headline numbers for the landing view, derived from the shared snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub total_recipes: usize,
    /// Minutes, rounded; zero with no recipes.
    pub avg_cook_time: u32,
    pub today_calories: f64,
}

impl DashboardStats {
    pub fn from_state(state: &AppState) -> Self {
        let total_recipes = state.recipes.len();
        let avg_cook_time = if total_recipes == 0 {
            0
        } else {
            let sum: u64 = state.recipes.iter().map(|r| u64::from(r.cook_time)).sum();
            (sum as f64 / total_recipes as f64).round() as u32
        };
        Self {
            total_recipes,
            avg_cook_time,
            today_calories: state.today_calories(),
        }
    }
}
