mod filter;
mod form;
mod view;

pub use filter::{Filter, RecipeFilter};
pub use form::{split_lines, RecipeForm};
pub use view::{Mode, RecipesView, ADDED, ADD_FAILED};
