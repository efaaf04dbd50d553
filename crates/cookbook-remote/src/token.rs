use std::sync::{PoisonError, RwLock};

/// Source of the bearer token for authenticated calls.
///
/// A missing token is a normal state (signed out), not an error.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Token store held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    /// Store a token. Blank tokens clear the store.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = (!token.is_empty()).then(|| token.to_string());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenProvider for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
