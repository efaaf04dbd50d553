use crate::recipe::Recipe;

/// Case-insensitive substring filter over recipe names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPredicate {
    query: String,
    needle: String,
}

impl SearchPredicate {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    /// The query as typed by the user.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.needle.is_empty() || recipe.name.to_lowercase().contains(&self.needle)
    }

    /// Recipes whose name matches, in collection order.
    pub fn filter<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}
