use std::future::Future;
use std::time::Duration;

use cookbook_core::{FavoriteSet, Recipe, RecipeId, ToggleOutcome};

use crate::error::RemoteError;
use crate::protocol::{parse_collection, parse_favorites, parse_toggle, ToggleRequest};

/// Trait for talking to the recipe service.
pub trait RecipeService: Send + Sync {
    /// Fetch the full recipe collection. No authentication.
    fn fetch_recipes(&self) -> impl Future<Output = Result<Vec<Recipe>, RemoteError>> + Send;

    /// Fetch the ids of the user's favorite recipes.
    fn fetch_favorites(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<FavoriteSet, RemoteError>> + Send;

    /// Toggle a favorite. The returned outcome is decided by the service.
    fn toggle_favorite(
        &self,
        token: &str,
        id: &RecipeId,
    ) -> impl Future<Output = Result<ToggleOutcome, RemoteError>> + Send;
}

/// Recipe service reached over HTTP.
pub struct HttpRecipeService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecipeService {
    /// Create a client for the service at `base_url`. Every request is
    /// bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

impl RecipeService for HttpRecipeService {
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, RemoteError> {
        let response = self.client.get(self.url("/recipes/")).send().await?;
        let body = Self::read_body(response).await?;
        parse_collection(&body)
    }

    async fn fetch_favorites(&self, token: &str) -> Result<FavoriteSet, RemoteError> {
        let response = self
            .client
            .get(self.url("/favorites"))
            .bearer_auth(token)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        parse_favorites(&body)
    }

    async fn toggle_favorite(
        &self,
        token: &str,
        id: &RecipeId,
    ) -> Result<ToggleOutcome, RemoteError> {
        let response = self
            .client
            .post(self.url("/favorites/toggle"))
            .bearer_auth(token)
            .json(&ToggleRequest::new(id.clone()))
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        parse_toggle(&body)
    }
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory recipe service for testing.
    ///
    /// Keeps the server-side favorites and toggles them by presence, the way
    /// the real service does. Counts calls so tests can assert that no
    /// request was made.
    #[derive(Default)]
    pub struct InMemoryRecipeService {
        recipes: RwLock<Vec<Recipe>>,
        favorites: RwLock<HashSet<RecipeId>>,
        accepted_token: RwLock<Option<String>>,
        toggle_delay: RwLock<Option<Duration>>,
        fail_recipes: AtomicBool,
        fail_favorites: AtomicBool,
        fail_toggle: AtomicBool,
        recipe_calls: AtomicUsize,
        favorite_calls: AtomicUsize,
        toggle_calls: AtomicUsize,
    }

    impl InMemoryRecipeService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_recipes(self, recipes: Vec<Recipe>) -> Self {
            *self.recipes.write().unwrap() = recipes;
            self
        }

        pub fn with_favorites<I, T>(self, ids: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<RecipeId>,
        {
            *self.favorites.write().unwrap() = ids.into_iter().map(Into::into).collect();
            self
        }

        /// Only accept this bearer token; others get a 401.
        pub fn with_accepted_token(self, token: impl Into<String>) -> Self {
            *self.accepted_token.write().unwrap() = Some(token.into());
            self
        }

        pub fn with_toggle_delay(self, delay: Duration) -> Self {
            *self.toggle_delay.write().unwrap() = Some(delay);
            self
        }

        pub fn set_recipes(&self, recipes: Vec<Recipe>) {
            *self.recipes.write().unwrap() = recipes;
        }

        /// Change the server-side favorites, as another session would.
        pub fn set_server_favorite(&self, id: impl Into<RecipeId>, favorite: bool) {
            let id = id.into();
            let mut favorites = self.favorites.write().unwrap();
            if favorite {
                favorites.insert(id);
            } else {
                favorites.remove(&id);
            }
        }

        pub fn server_favorites(&self) -> HashSet<RecipeId> {
            self.favorites.read().unwrap().clone()
        }

        pub fn fail_recipes(&self, fail: bool) {
            self.fail_recipes.store(fail, Ordering::SeqCst);
        }

        pub fn fail_favorites(&self, fail: bool) {
            self.fail_favorites.store(fail, Ordering::SeqCst);
        }

        pub fn fail_toggle(&self, fail: bool) {
            self.fail_toggle.store(fail, Ordering::SeqCst);
        }

        pub fn recipe_calls(&self) -> usize {
            self.recipe_calls.load(Ordering::SeqCst)
        }

        pub fn favorite_calls(&self) -> usize {
            self.favorite_calls.load(Ordering::SeqCst)
        }

        pub fn toggle_calls(&self) -> usize {
            self.toggle_calls.load(Ordering::SeqCst)
        }

        fn check_token(&self, token: &str) -> Result<(), RemoteError> {
            match self.accepted_token.read().unwrap().as_deref() {
                Some(accepted) if accepted != token => Err(RemoteError::Status(401)),
                _ => Ok(()),
            }
        }
    }

    impl RecipeService for InMemoryRecipeService {
        async fn fetch_recipes(&self) -> Result<Vec<Recipe>, RemoteError> {
            self.recipe_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_recipes.load(Ordering::SeqCst) {
                return Err(RemoteError::Status(500));
            }
            Ok(self.recipes.read().unwrap().clone())
        }

        async fn fetch_favorites(&self, token: &str) -> Result<FavoriteSet, RemoteError> {
            self.favorite_calls.fetch_add(1, Ordering::SeqCst);
            self.check_token(token)?;
            if self.fail_favorites.load(Ordering::SeqCst) {
                return Err(RemoteError::Transport("connection refused".to_string()));
            }
            Ok(self.favorites.read().unwrap().iter().cloned().collect())
        }

        async fn toggle_favorite(
            &self,
            token: &str,
            id: &RecipeId,
        ) -> Result<ToggleOutcome, RemoteError> {
            self.toggle_calls.fetch_add(1, Ordering::SeqCst);
            self.check_token(token)?;

            let delay = *self.toggle_delay.read().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_toggle.load(Ordering::SeqCst) {
                return Err(RemoteError::Status(500));
            }

            let mut favorites = self.favorites.write().unwrap();
            if favorites.remove(id) {
                Ok(ToggleOutcome::Removed)
            } else {
                favorites.insert(id.clone());
                Ok(ToggleOutcome::Added)
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service =
            HttpRecipeService::new("https://recipes.example.com/", Duration::from_secs(5)).unwrap();

        assert_eq!(service.base_url(), "https://recipes.example.com");
        assert_eq!(
            service.url("/recipes/"),
            "https://recipes.example.com/recipes/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let service =
            HttpRecipeService::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let err = service.fetch_recipes().await.unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
    }
}
