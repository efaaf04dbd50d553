use axum::{routing::get, Router};

use crate::state::AppState;

pub fn routes<S: Send + Sync + 'static>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
