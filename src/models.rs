use serde::{Deserialize, Serialize};

use cookbook_core::{Recipe, RecipeId, ToggleOutcome};

/// One recipe as rendered on the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub name: String,
    pub time_to_cook: String,
    /// Recipe image, or the placeholder when the recipe has none.
    pub image: String,
    pub favorited: bool,
    /// Route of the detail view.
    pub href: String,
}

impl RecipeCard {
    pub fn new(recipe: &Recipe, favorited: bool, placeholder_image: &str) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            time_to_cook: recipe.time_to_cook.clone(),
            image: recipe
                .image
                .clone()
                .unwrap_or_else(|| placeholder_image.to_string()),
            favorited,
            href: recipe.detail_href(),
        }
    }
}

/// Everything the UI shell needs to render the list view.
/// Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub query: String,
    pub current_page: usize,
    pub page_count: usize,
    pub page_numbers: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    pub total_recipes: usize,
    pub total_matches: usize,
    /// True when the current page has nothing to show.
    pub is_empty: bool,
    pub recipes: Vec<RecipeCard>,
}

/// Outcome of loading one source at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "count", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded(usize),
    /// No token was available, nothing was requested.
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MountReport {
    pub recipes: LoadStatus,
    pub favorites: LoadStatus,
}

/// Request body for `PUT /api/view/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Request body for `PUT /api/session`.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub token: String,
}

/// Response for `PUT /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub favorites: LoadStatus,
}

/// Response for a favorite toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: RecipeId,
    pub outcome: ToggleOutcome,
    pub favorited: bool,
}
