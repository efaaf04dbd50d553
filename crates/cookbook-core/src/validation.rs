use std::collections::HashSet;

use crate::error::ValidationError;
use crate::recipe::Recipe;

/// Schema checks applied to data arriving from the recipe service.
pub struct Validator;

impl Validator {
    /// Validate a recipe identifier. Must be non-empty.
    pub fn validate_recipe_id(id: &str) -> Result<(), ValidationError> {
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(())
    }

    /// Validate a fetched collection.
    /// Every id must be valid and unique within the collection.
    pub fn validate_collection(recipes: &[Recipe]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(recipes.len());
        for recipe in recipes {
            Self::validate_recipe_id(recipe.id.as_str())?;
            if !seen.insert(&recipe.id) {
                return Err(ValidationError::DuplicateId(recipe.id.to_string()));
            }
        }
        Ok(())
    }
}
