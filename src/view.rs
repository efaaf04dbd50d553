use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use cookbook_core::{
    FavoriteSet, Paginator, Recipe, RecipeId, SearchPredicate, ToggleOutcome, ViewError,
};
use cookbook_remote::{PendingToggles, RecipeService, TokenProvider};

use crate::config::{Config, DEFAULT_PLACEHOLDER_IMAGE};
use crate::models::{LoadStatus, MountReport, RecipeCard, ViewSnapshot};

/// Behavior switches for the list view.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Go back to page 1 whenever the search query changes.
    pub reset_page_on_search: bool,
    pub placeholder_image: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            reset_page_on_search: false,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl From<&Config> for ViewOptions {
    fn from(config: &Config) -> Self {
        Self {
            reset_page_on_search: config.reset_page_on_search,
            placeholder_image: config.placeholder_image.clone(),
        }
    }
}

#[derive(Default)]
struct ViewState {
    recipes: Vec<Recipe>,
    favorites: FavoriteSet,
    search: SearchPredicate,
    paginator: Paginator,
    /// Bumped whenever the favorites are cleared. Service results that were
    /// requested under an older session are dropped.
    session: u64,
}

impl ViewState {
    fn match_count(&self) -> usize {
        self.recipes
            .iter()
            .filter(|r| self.search.matches(r))
            .count()
    }
}

/// Controller behind the recipe list view.
///
/// Combines the loaded collection, the user's favorites, the search query
/// and the current page into a snapshot that can be recomputed at any time.
/// The state lock is never held across a call to the recipe service.
pub struct ListView<S> {
    service: Arc<S>,
    tokens: Arc<dyn TokenProvider>,
    pending: PendingToggles,
    options: ViewOptions,
    state: RwLock<ViewState>,
}

impl<S: RecipeService> ListView<S> {
    /// Create an empty view. Must be called inside a tokio runtime.
    pub fn new(service: Arc<S>, tokens: Arc<dyn TokenProvider>, options: ViewOptions) -> Self {
        Self {
            service,
            tokens,
            pending: PendingToggles::spawn(),
            options,
            state: RwLock::new(ViewState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the collection and the favorites concurrently.
    /// Each source degrades on its own; neither blocks the other.
    pub async fn mount(&self) -> MountReport {
        let (recipes, favorites) = tokio::join!(self.load_collection(), self.load_favorites());
        MountReport { recipes, favorites }
    }

    /// Replace the collection with a fresh copy from the service.
    /// On failure the previous collection is kept.
    pub async fn load_collection(&self) -> LoadStatus {
        match self.service.fetch_recipes().await {
            Ok(recipes) => {
                let count = recipes.len();
                self.write().recipes = recipes;
                tracing::info!("Loaded {} recipes", count);
                LoadStatus::Loaded(count)
            }
            Err(e) => {
                tracing::warn!("Error fetching recipes: {}", e);
                LoadStatus::Failed
            }
        }
    }

    /// Replace the favorites with the user's favorites from the service.
    /// Without a token this does nothing.
    pub async fn load_favorites(&self) -> LoadStatus {
        let Some(token) = self.tokens.token() else {
            tracing::debug!("No token available, skipping favorites");
            return LoadStatus::Skipped;
        };

        let session = self.read().session;
        match self.service.fetch_favorites(&token).await {
            Ok(favorites) => {
                let count = favorites.len();
                let mut state = self.write();
                if state.session != session {
                    tracing::debug!("Session ended while loading favorites, discarding");
                    return LoadStatus::Skipped;
                }
                state.favorites = favorites;
                drop(state);
                tracing::info!("Loaded {} favorites", count);
                LoadStatus::Loaded(count)
            }
            Err(e) => {
                tracing::warn!("Error fetching favorites: {}", e);
                LoadStatus::Failed
            }
        }
    }

    /// Forget the user's favorites, e.g. on sign out. Loads and toggles
    /// still in flight will not write into the cleared set.
    pub fn clear_favorites(&self) {
        let mut state = self.write();
        state.session += 1;
        state.favorites.clear();
    }

    /// Toggle the favorite flag of a recipe through the service.
    ///
    /// The service decides whether the recipe was added or removed and the
    /// local favorites follow that outcome. Nothing changes locally when the
    /// call fails, and only one toggle per recipe can be in flight.
    pub async fn toggle_favorite(&self, id: &RecipeId) -> Result<ToggleOutcome, ViewError> {
        let Some(token) = self.tokens.token() else {
            tracing::warn!("Cannot toggle favorite {}: not authenticated", id);
            return Err(ViewError::Unauthenticated);
        };

        let Some(_guard) = self.pending.claim(id).await else {
            tracing::debug!("Toggle for {} already in flight", id);
            return Err(ViewError::ToggleInFlight(id.clone()));
        };

        let session = self.read().session;
        match self.service.toggle_favorite(&token, id).await {
            Ok(outcome) => {
                {
                    let mut state = self.write();
                    if state.session == session {
                        state.favorites.apply(id.clone(), outcome);
                    } else {
                        tracing::debug!("Session ended while toggling {}, not applying", id);
                    }
                }
                tracing::info!("Favorite {} {:?}", id, outcome);
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("Error toggling favorite {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        self.read().favorites.contains(id)
    }

    /// Look up a loaded recipe.
    pub fn recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.read().recipes.iter().find(|r| &r.id == id).cloned()
    }

    pub fn set_search(&self, query: &str) {
        let mut state = self.write();
        state.search = SearchPredicate::new(query);
        if self.options.reset_page_on_search {
            state.paginator.reset();
        }
    }

    /// Move to page `n`, clamped to the pages of the current matches.
    pub fn go_to(&self, n: usize) -> usize {
        let mut state = self.write();
        let len = state.match_count();
        state.paginator.go_to(n, len)
    }

    pub fn next(&self) -> usize {
        let mut state = self.write();
        let len = state.match_count();
        state.paginator.next(len)
    }

    pub fn prev(&self) -> usize {
        let mut state = self.write();
        let len = state.match_count();
        state.paginator.prev(len)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.read();
        let filtered = state.search.filter(&state.recipes);
        let len = filtered.len();

        let recipes: Vec<RecipeCard> = state
            .paginator
            .slice(&filtered)
            .iter()
            .map(|r| {
                RecipeCard::new(
                    r,
                    state.favorites.contains(&r.id),
                    &self.options.placeholder_image,
                )
            })
            .collect();

        ViewSnapshot {
            query: state.search.query().to_string(),
            current_page: state.paginator.current_page(),
            page_count: state.paginator.page_count(len),
            page_numbers: state.paginator.page_numbers(len).collect(),
            has_prev: state.paginator.has_prev(),
            has_next: state.paginator.has_next(len),
            total_recipes: state.recipes.len(),
            total_matches: len,
            is_empty: recipes.is_empty(),
            recipes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use cookbook_remote::{InMemoryRecipeService, MemoryTokenStore};

    fn recipes(n: usize) -> Vec<Recipe> {
        (0..n)
            .map(|i| Recipe::new(format!("r{}", i), format!("Recipe {}", i), "10 min", None))
            .collect()
    }

    fn sample() -> Vec<Recipe> {
        vec![
            Recipe::new("a", "Pasta", "20 min", None),
            Recipe::new("b", "Soup", "35 min", None),
            Recipe::new("c", "Pastry", "1 h", None),
        ]
    }

    fn make_view(
        service: InMemoryRecipeService,
        token: Option<&str>,
    ) -> (ListView<InMemoryRecipeService>, Arc<InMemoryRecipeService>) {
        let service = Arc::new(service);
        let tokens: Arc<dyn TokenProvider> = match token {
            Some(t) => Arc::new(MemoryTokenStore::with_token(t)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        let view = ListView::new(service.clone(), tokens, ViewOptions::default());
        (view, service)
    }

    fn ids(snapshot: &ViewSnapshot) -> Vec<String> {
        snapshot.recipes.iter().map(|c| c.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_before_mount() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(sample()), None);

        let snapshot = view.snapshot();

        assert!(snapshot.is_empty);
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.page_count, 1);
        assert_eq!(snapshot.page_numbers, vec![1]);
    }

    #[tokio::test]
    async fn test_mount_loads_both_sources() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["c", "gone"]);
        let (view, _) = make_view(service, Some("token"));

        let report = view.mount().await;

        assert_eq!(report.recipes, LoadStatus::Loaded(3));
        assert_eq!(report.favorites, LoadStatus::Loaded(2));

        let snapshot = view.snapshot();
        assert_eq!(ids(&snapshot), vec!["a", "b", "c"]);
        let favorited: Vec<bool> = snapshot.recipes.iter().map(|c| c.favorited).collect();
        assert_eq!(favorited, vec![false, false, true]);
    }

    #[tokio::test]
    async fn test_favorites_skipped_without_token() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        let (view, service) = make_view(service, None);

        let report = view.mount().await;

        assert_eq!(report.favorites, LoadStatus::Skipped);
        assert_eq!(service.favorite_calls(), 0);
        assert!(!view.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_failed_collection_keeps_previous() {
        let (view, service) = make_view(InMemoryRecipeService::new().with_recipes(sample()), None);
        view.load_collection().await;

        service.fail_recipes(true);
        service.set_recipes(recipes(10));
        let status = view.load_collection().await;

        assert_eq!(status, LoadStatus::Failed);
        assert_eq!(view.snapshot().total_recipes, 3);
    }

    #[tokio::test]
    async fn test_failed_favorites_keep_previous() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        let (view, service) = make_view(service, Some("token"));
        view.mount().await;

        service.fail_favorites(true);
        let status = view.load_favorites().await;

        assert_eq!(status, LoadStatus::Failed);
        assert!(view.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_one_source_failing_does_not_affect_other() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        service.fail_recipes(true);
        let (view, _) = make_view(service, Some("token"));

        let report = view.mount().await;

        assert_eq!(report.recipes, LoadStatus::Failed);
        assert_eq!(report.favorites, LoadStatus::Loaded(1));
    }

    #[tokio::test]
    async fn test_search_scenario() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(sample()), None);
        view.mount().await;

        view.set_search("pas");
        let snapshot = view.snapshot();

        assert_eq!(ids(&snapshot), vec!["a", "c"]);
        assert_eq!(snapshot.page_count, 1);
        assert_eq!(snapshot.total_matches, 2);
        assert_eq!(snapshot.query, "pas");
    }

    #[tokio::test]
    async fn test_third_page_of_ten() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(recipes(10)), None);
        view.mount().await;

        assert_eq!(view.go_to(3), 3);
        let snapshot = view.snapshot();

        assert_eq!(ids(&snapshot), vec!["r8", "r9"]);
        assert_eq!(snapshot.page_count, 3);
        assert_eq!(snapshot.page_numbers, vec![1, 2, 3]);
        assert!(snapshot.has_prev);
        assert!(!snapshot.has_next);
    }

    #[tokio::test]
    async fn test_navigation_clamps() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(recipes(10)), None);
        view.mount().await;

        assert_eq!(view.go_to(0), 1);
        assert_eq!(view.prev(), 1);
        assert_eq!(view.go_to(8), 3);
        assert_eq!(view.next(), 3);
        assert_eq!(view.prev(), 2);
    }

    #[tokio::test]
    async fn test_stale_page_after_search_is_empty() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(recipes(10)), None);
        view.mount().await;
        view.go_to(3);

        view.set_search("Recipe 1");
        let snapshot = view.snapshot();

        assert_eq!(snapshot.current_page, 3);
        assert_eq!(snapshot.page_count, 1);
        assert_eq!(snapshot.total_matches, 1);
        assert!(snapshot.is_empty);
    }

    #[tokio::test]
    async fn test_reset_page_on_search_option() {
        let service = Arc::new(InMemoryRecipeService::new().with_recipes(recipes(10)));
        let options = ViewOptions {
            reset_page_on_search: true,
            ..ViewOptions::default()
        };
        let view = ListView::new(service, Arc::new(MemoryTokenStore::new()), options);
        view.mount().await;
        view.go_to(3);

        view.set_search("Recipe 1");
        let snapshot = view.snapshot();

        assert_eq!(snapshot.current_page, 1);
        assert_eq!(ids(&snapshot), vec!["r1"]);
    }

    #[tokio::test]
    async fn test_toggle_without_token_is_unauthenticated() {
        let (view, service) = make_view(InMemoryRecipeService::new().with_recipes(sample()), None);
        view.mount().await;

        let result = view.toggle_favorite(&"x".into()).await;

        assert_eq!(result, Err(ViewError::Unauthenticated));
        assert!(!view.is_favorite(&"x".into()));
        assert_eq!(service.toggle_calls(), 0);
    }

    #[tokio::test]
    async fn test_toggle_follows_server_outcome() {
        let (view, service) =
            make_view(InMemoryRecipeService::new().with_recipes(sample()), Some("t"));
        view.mount().await;

        // Another session already favorited "b"; local state does not know.
        service.set_server_favorite("b", true);
        assert!(!view.is_favorite(&"b".into()));

        let outcome = view.toggle_favorite(&"b".into()).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Removed);
        assert!(!view.is_favorite(&"b".into()));

        let outcome = view.toggle_favorite(&"b".into()).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Added);
        assert!(view.is_favorite(&"b".into()));
    }

    #[tokio::test]
    async fn test_toggle_removed_while_locally_absent_stays_absent() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        let (view, _) = make_view(service, Some("t"));
        view.load_collection().await;

        assert!(!view.is_favorite(&"a".into()));
        let outcome = view.toggle_favorite(&"a".into()).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::Removed);
        assert!(!view.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_favorites() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        let (view, service) = make_view(service, Some("t"));
        view.mount().await;

        service.fail_toggle(true);
        let result = view.toggle_favorite(&"a".into()).await;

        assert!(matches!(result, Err(ViewError::Transport(_))));
        assert!(view.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_concurrent_toggle_same_id_is_refused() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_toggle_delay(Duration::from_millis(50));
        let (view, service) = make_view(service, Some("t"));
        let id = RecipeId::from("a");

        let (first, second) = tokio::join!(view.toggle_favorite(&id), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            view.toggle_favorite(&id).await
        });

        assert_eq!(first, Ok(ToggleOutcome::Added));
        assert_eq!(second, Err(ViewError::ToggleInFlight(id.clone())));
        assert_eq!(service.toggle_calls(), 1);

        // Guard is released once the first toggle resolves
        assert_eq!(view.toggle_favorite(&id).await, Ok(ToggleOutcome::Removed));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_on_different_ids() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_toggle_delay(Duration::from_millis(20));
        let (view, _) = make_view(service, Some("t"));

        let (ia, ib) = (RecipeId::from("a"), RecipeId::from("b"));
        let (a, b) = tokio::join!(view.toggle_favorite(&ia), view.toggle_favorite(&ib));

        assert_eq!(a, Ok(ToggleOutcome::Added));
        assert_eq!(b, Ok(ToggleOutcome::Added));
        assert!(view.is_favorite(&"a".into()));
        assert!(view.is_favorite(&"b".into()));
    }

    #[tokio::test]
    async fn test_clear_favorites() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a", "b"]);
        let (view, _) = make_view(service, Some("t"));
        view.mount().await;

        view.clear_favorites();

        assert!(view.snapshot().recipes.iter().all(|c| !c.favorited));
    }

    #[tokio::test]
    async fn test_toggle_finishing_after_clear_is_discarded() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_toggle_delay(Duration::from_millis(50));
        let (view, service) = make_view(service, Some("t"));
        view.mount().await;
        let id = RecipeId::from("a");

        let (result, _) = tokio::join!(view.toggle_favorite(&id), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            view.clear_favorites();
        });

        assert_eq!(result, Ok(ToggleOutcome::Added));
        assert_eq!(service.toggle_calls(), 1);
        assert!(!view.is_favorite(&id));
        assert!(view.snapshot().recipes.iter().all(|c| !c.favorited));
    }

    #[tokio::test]
    async fn test_favorites_load_after_clear_applies_again() {
        let service = InMemoryRecipeService::new()
            .with_recipes(sample())
            .with_favorites(["a"]);
        let (view, _) = make_view(service, Some("t"));
        view.mount().await;

        view.clear_favorites();
        assert!(!view.is_favorite(&"a".into()));

        assert_eq!(view.load_favorites().await, LoadStatus::Loaded(1));
        assert!(view.is_favorite(&"a".into()));
    }

    #[tokio::test]
    async fn test_recipe_lookup() {
        let (view, _) = make_view(InMemoryRecipeService::new().with_recipes(sample()), None);
        view.mount().await;

        assert_eq!(view.recipe(&"b".into()).unwrap().name, "Soup");
        assert!(view.recipe(&"zz".into()).is_none());
    }
}
