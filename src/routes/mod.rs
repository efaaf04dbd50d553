pub mod favorites;
pub mod health;
pub mod view;

use axum::Router;
use tower_http::cors::CorsLayer;

use cookbook_remote::RecipeService;

use crate::state::AppState;

pub fn create_router<S: RecipeService + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .merge(view::routes::<S>())
        .merge(favorites::routes::<S>())
        .merge(health::routes::<S>())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
