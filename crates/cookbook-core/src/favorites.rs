use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::recipe::RecipeId;

/// Server-reported result of a favorite toggle.
///
/// The server is the only authority on whether a toggle added or removed
/// the recipe; local membership is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Identifiers of the recipes the current user has marked as favorite.
///
/// Identifiers that do not appear in the loaded collection are inert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<RecipeId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Apply a toggle outcome for `id`.
    pub fn apply(&mut self, id: RecipeId, outcome: ToggleOutcome) {
        match outcome {
            ToggleOutcome::Added => {
                self.ids.insert(id);
            }
            ToggleOutcome::Removed => {
                self.ids.remove(&id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<RecipeId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
