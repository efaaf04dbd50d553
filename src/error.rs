use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use cookbook_core::{RecipeId, ViewError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(RecipeId),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::View(ViewError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            ApiError::View(ViewError::ToggleInFlight(_)) => StatusCode::CONFLICT,
            ApiError::View(ViewError::Transport(_)) => StatusCode::BAD_GATEWAY,
            ApiError::View(ViewError::MalformedResponse(_)) => StatusCode::BAD_GATEWAY,
            ApiError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
