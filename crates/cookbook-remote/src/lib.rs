//! Cookbook Remote - Access to the recipe service.
//!
//! Wire protocol, the `RecipeService` trait with its HTTP implementation,
//! token providers, and the per-recipe toggle guard.

pub mod client;
pub mod error;
pub mod pending;
pub mod protocol;
pub mod token;

pub use client::{HttpRecipeService, RecipeService};
pub use error::RemoteError;
pub use pending::{PendingToggles, ToggleGuard};
pub use protocol::{FavoriteRecord, RecipeRecord, ToggleRequest, ToggleResponse, REMOVED_MESSAGE};
pub use token::{MemoryTokenStore, TokenProvider};

#[cfg(any(test, feature = "test-utils"))]
pub use client::memory::InMemoryRecipeService;
