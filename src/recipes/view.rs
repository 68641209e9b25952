use tracing::{error, info, instrument};

use super::filter::RecipeFilter;
use super::form::RecipeForm;
use crate::api::{CookbookApi, Recipe};
use crate::error::ViewError;
use crate::state::AppState;

pub const ADDED: &str = "Recipe added successfully!";
pub const ADD_FAILED: &str = "Failed to add recipe. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browsing,
    AddDialogOpen,
}

#[derive(Debug, Default)]
pub struct RecipesView {
    pub filter: RecipeFilter,
    pub draft: RecipeForm,
    mode: Mode,
}

impl RecipesView {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn open_dialog(&mut self) {
        self.mode = Mode::AddDialogOpen;
    }

    /// Closing keeps whatever was typed.
    pub fn close_dialog(&mut self) {
        self.mode = Mode::Browsing;
    }

    pub fn visible<'a>(&self, state: &'a AppState) -> Vec<&'a Recipe> {
        self.filter.apply(&state.recipes)
    }

    /// Sends the draft and appends the server's record to the shared list.
    ///
    /// On any failure the dialog stays open with the draft untouched.
    #[instrument(skip_all, fields(name = %self.draft.name))]
    pub async fn submit(
        &mut self,
        api: &dyn CookbookApi,
        state: &mut AppState,
    ) -> Result<(), ViewError> {
        let new_recipe = self.draft.normalize()?;
        match api.create_recipe(&new_recipe).await {
            Ok(created) => {
                info!(recipe_id = %created.id, "recipe created");
                state.recipes.push(created);
                self.mode = Mode::Browsing;
                self.draft = RecipeForm::default();
                state.notices.success(ADDED);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "create recipe failed");
                state.notices.error(ADD_FAILED);
                Err(e.into())
            }
        }
    }
}
