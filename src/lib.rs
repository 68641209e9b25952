//! Client for the CookAlgo recipe, meal-planning, nutrition and cooking
//! assistant backend.
//!
//! Views own their local state and talk to the backend through
//! [`api::CookbookApi`]. Data shared across views lives in [`state::AppState`]
//! and is passed in explicitly.

pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loading;
pub mod meal_plans;
pub mod notify;
pub mod nutrition;
pub mod recipes;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
