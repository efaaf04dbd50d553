use std::sync::Arc;

use cookbook_remote::{MemoryTokenStore, RecipeService, TokenProvider};

use crate::view::{ListView, ViewOptions};

/// Application state shared across handlers.
pub struct AppState<S> {
    pub view: Arc<ListView<S>>,
    pub tokens: Arc<MemoryTokenStore>,
}

// Manual impl: cloning the state never requires cloning the service.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<S: RecipeService> AppState<S> {
    pub fn new(service: Arc<S>, tokens: Arc<MemoryTokenStore>, options: ViewOptions) -> Self {
        let provider: Arc<dyn TokenProvider> = tokens.clone();
        Self {
            view: Arc::new(ListView::new(service, provider, options)),
            tokens,
        }
    }
}
