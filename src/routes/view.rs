use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use cookbook_core::{Recipe, RecipeId};
use cookbook_remote::RecipeService;

use crate::error::ApiError;
use crate::models::{MountReport, SearchRequest, ViewSnapshot};
use crate::state::AppState;

pub fn routes<S: RecipeService + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/api/view", get(get_view::<S>))
        .route("/api/view/search", put(set_search::<S>))
        .route("/api/view/page/{n}", post(go_to_page::<S>))
        .route("/api/view/next", post(next_page::<S>))
        .route("/api/view/prev", post(prev_page::<S>))
        .route("/api/view/reload", post(reload::<S>))
        .route("/api/recipes/{id}", get(get_recipe::<S>))
}

/// GET /api/view - Current page of the list view.
async fn get_view<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
) -> Json<ViewSnapshot> {
    Json(state.view.snapshot())
}

/// PUT /api/view/search - Replace the search query.
async fn set_search<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<SearchRequest>,
) -> Json<ViewSnapshot> {
    state.view.set_search(&request.query);
    Json(state.view.snapshot())
}

/// POST /api/view/page/{n} - Jump to a page, clamped to the available pages.
async fn go_to_page<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
    Path(n): Path<usize>,
) -> Json<ViewSnapshot> {
    state.view.go_to(n);
    Json(state.view.snapshot())
}

/// POST /api/view/next
async fn next_page<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
) -> Json<ViewSnapshot> {
    state.view.next();
    Json(state.view.snapshot())
}

/// POST /api/view/prev
async fn prev_page<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
) -> Json<ViewSnapshot> {
    state.view.prev();
    Json(state.view.snapshot())
}

/// POST /api/view/reload - Fetch the collection and favorites again.
async fn reload<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
) -> Json<MountReport> {
    Json(state.view.mount().await)
}

/// GET /api/recipes/{id} - A loaded recipe, for the detail view.
async fn get_recipe<S: RecipeService + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let id = RecipeId::from(id);
    state
        .view
        .recipe(&id)
        .map(Json)
        .ok_or(ApiError::RecipeNotFound(id))
}
