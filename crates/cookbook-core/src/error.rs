use thiserror::Error;

use crate::recipe::RecipeId;

/// Failures surfaced by list view operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Not authenticated: no token available")]
    Unauthenticated,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Toggle already in flight for recipe {0}")]
    ToggleInFlight(RecipeId),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Recipe id cannot be empty")]
    EmptyId,

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),

    #[error("Favorite record is missing its recipe reference")]
    MissingRecipeRef,

    #[error("Toggle response is missing its message")]
    MissingMessage,
}

impl From<ValidationError> for ViewError {
    fn from(e: ValidationError) -> Self {
        ViewError::MalformedResponse(e.to_string())
    }
}
