use serde::{Deserialize, Serialize};

/// Opaque identifier of a recipe, stable across requests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A recipe as consumed by the list view. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub time_to_cook: String,
    pub image: Option<String>,
}

impl Recipe {
    /// Create a recipe. An empty image is treated as no image.
    pub fn new(
        id: impl Into<RecipeId>,
        name: impl Into<String>,
        time_to_cook: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time_to_cook: time_to_cook.into(),
            image: image.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Route of the detail view for this recipe.
    pub fn detail_href(&self) -> String {
        format!("/recipe/{}", self.id)
    }
}
