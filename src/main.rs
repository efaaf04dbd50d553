use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cookbook::{create_router, AppState, Config, ViewOptions};
use cookbook_remote::{HttpRecipeService, MemoryTokenStore};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: COOKBOOK_LISTEN_ADDR (default: 0.0.0.0:3000)");
            eprintln!("Optional: COOKBOOK_API_URL, COOKBOOK_TOKEN, COOKBOOK_REQUEST_TIMEOUT_SECS");
            eprintln!("Optional: COOKBOOK_RESET_PAGE_ON_SEARCH, COOKBOOK_PLACEHOLDER_IMAGE");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Cookbook server");
    tracing::info!("Listen address: {}", config.listen_addr);

    let service = match HttpRecipeService::new(&config.api_url, config.request_timeout) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("HTTP client error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Recipe service: {}", service.base_url());

    let tokens = Arc::new(match &config.token {
        Some(token) => MemoryTokenStore::with_token(token.as_str()),
        None => MemoryTokenStore::new(),
    });

    // Create app state
    let state = AppState::new(service, tokens, ViewOptions::from(&config));

    // Initial load runs in the background; the view serves empty state until then
    let view = state.view.clone();
    tokio::spawn(async move {
        let report = view.mount().await;
        tracing::info!(
            "Initial load finished: recipes {:?}, favorites {:?}",
            report.recipes,
            report.favorites
        );
    });

    // Build router
    let app = create_router(state);

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
