use serde::{Deserialize, Serialize};

use cookbook_core::{FavoriteSet, Recipe, RecipeId, ToggleOutcome, ValidationError, Validator};

use crate::error::RemoteError;

/// Message the service sends when a toggle removed the favorite.
pub const REMOVED_MESSAGE: &str = "Removed from favorites";

/// A recipe as sent by the collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "timeToCook", default)]
    pub time_to_cook: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<RecipeRecord> for Recipe {
    fn from(r: RecipeRecord) -> Self {
        Recipe::new(
            r.id,
            r.name.unwrap_or_default(),
            r.time_to_cook.unwrap_or_default(),
            r.image,
        )
    }
}

/// Reference to a recipe nested inside a favorite record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// A favorite as sent by the favorites endpoint.
/// Only the nested recipe id is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(rename = "recipeId", default)]
    pub recipe: Option<RecipeRef>,
}

impl FavoriteRecord {
    pub fn recipe_id(self) -> Result<RecipeId, ValidationError> {
        let recipe = self.recipe.ok_or(ValidationError::MissingRecipeRef)?;
        Validator::validate_recipe_id(&recipe.id)?;
        Ok(RecipeId(recipe.id))
    }
}

/// Body of a favorite toggle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    #[serde(rename = "recipeId")]
    pub recipe_id: RecipeId,
}

impl ToggleRequest {
    pub fn new(recipe_id: RecipeId) -> Self {
        Self { recipe_id }
    }
}

/// Response to a favorite toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ToggleResponse {
    /// Any message other than the removal marker means the recipe was added.
    pub fn outcome(&self) -> Result<ToggleOutcome, ValidationError> {
        match self.message.as_deref() {
            Some(REMOVED_MESSAGE) => Ok(ToggleOutcome::Removed),
            Some(_) => Ok(ToggleOutcome::Added),
            None => Err(ValidationError::MissingMessage),
        }
    }
}

/// Parse and validate a collection response body.
pub fn parse_collection(body: &str) -> Result<Vec<Recipe>, RemoteError> {
    let records: Vec<RecipeRecord> = serde_json::from_str(body)?;
    let recipes: Vec<Recipe> = records.into_iter().map(Recipe::from).collect();
    Validator::validate_collection(&recipes)?;
    Ok(recipes)
}

/// Parse a favorites response body into a flat set of recipe ids.
pub fn parse_favorites(body: &str) -> Result<FavoriteSet, RemoteError> {
    let records: Vec<FavoriteRecord> = serde_json::from_str(body)?;
    let ids = records
        .into_iter()
        .map(FavoriteRecord::recipe_id)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids.into_iter().collect())
}

/// Parse a toggle response body into the server-reported outcome.
pub fn parse_toggle(body: &str) -> Result<ToggleOutcome, RemoteError> {
    let response: ToggleResponse = serde_json::from_str(body)?;
    Ok(response.outcome()?)
}
