use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};

use cookbook_core::RecipeId;
use cookbook_remote::{RecipeService, TokenProvider};

use crate::error::ApiError;
use crate::models::{LoadStatus, SessionRequest, SessionResponse, ToggleResponse};
use crate::state::AppState;

pub fn routes<S: RecipeService + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/api/favorites/{id}/toggle", post(toggle_favorite::<S>))
        .route("/api/session", put(sign_in::<S>).delete(sign_out::<S>))
}

/// POST /api/favorites/{id}/toggle - Toggle a favorite through the service.
async fn toggle_favorite<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let id = RecipeId::from(id);
    let outcome = state.view.toggle_favorite(&id).await?;
    let favorited = state.view.is_favorite(&id);
    Ok(Json(ToggleResponse {
        id,
        outcome,
        favorited,
    }))
}

/// PUT /api/session - Store the bearer token and load the user's favorites.
/// A blank token signs out. Favorites of the previous session never carry over.
async fn sign_in<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<SessionRequest>,
) -> Json<SessionResponse> {
    state.tokens.set(request.token);
    state.view.clear_favorites();
    let favorites = state.view.load_favorites().await;
    Json(SessionResponse {
        authenticated: state.tokens.token().is_some(),
        favorites,
    })
}

/// DELETE /api/session - Forget the token and the favorites.
async fn sign_out<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
) -> Json<SessionResponse> {
    state.tokens.clear();
    state.view.clear_favorites();
    Json(SessionResponse {
        authenticated: false,
        favorites: LoadStatus::Skipped,
    })
}
