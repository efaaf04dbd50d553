//! Cookbook Core - Domain models, view computations, and validation.
//!
//! This crate contains the pure logic behind the recipe list view: the
//! recipe and favorite models, the search filter and the paginator. It
//! performs no I/O and has no dependencies on other Cookbook crates.

pub mod error;
pub mod favorites;
pub mod paginator;
pub mod recipe;
pub mod search;
pub mod validation;

// Re-exports for convenience
pub use error::{ValidationError, ViewError};
pub use favorites::{FavoriteSet, ToggleOutcome};
pub use paginator::{page_count, Paginator, PAGE_SIZE};
pub use recipe::{Recipe, RecipeId};
pub use search::SearchPredicate;
pub use validation::Validator;
