//! Cookbook - Recipe list view served over HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::ApiError;
pub use models::{LoadStatus, MountReport, RecipeCard, ViewSnapshot};
pub use routes::create_router;
pub use state::AppState;
pub use view::{ListView, ViewOptions};
