//! Favorites: per-user bookmark set plus best-effort hydration.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::domain::{FavoriteEntry, RecipeDetail};
use crate::error::StoreError;
use crate::ports::{FavoritesRepository, RecipeCatalog};

/// Detail fetches in flight at once while hydrating.
pub const DEFAULT_HYDRATION_CONCURRENCY: usize = 4;

/// Favorites operations over a document store and the recipe catalog.
///
/// Reads degrade to an empty list; writes propagate their error so the
/// caller can show a transient notice.
#[derive(Clone)]
pub struct FavoritesService {
    favorites: Arc<dyn FavoritesRepository>,
    catalog: Arc<dyn RecipeCatalog>,
    hydration_concurrency: usize,
}

impl FavoritesService {
    pub fn new(favorites: Arc<dyn FavoritesRepository>, catalog: Arc<dyn RecipeCatalog>) -> Self {
        Self {
            favorites,
            catalog,
            hydration_concurrency: DEFAULT_HYDRATION_CONCURRENCY,
        }
    }

    pub fn with_hydration_concurrency(mut self, limit: usize) -> Self {
        self.hydration_concurrency = limit.max(1);
        self
    }

    /// Mark a recipe as favorite. Re-adding keeps the original entry, so
    /// its `addedAt` and list position do not change.
    pub async fn add_favorite(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError> {
        self.favorites
            .insert(user_id, FavoriteEntry::new(recipe_id))
            .await
            .inspect_err(|e| tracing::error!(user_id, recipe_id, error = %e, "Failed to add favorite"))?;
        tracing::debug!(user_id, recipe_id, "Favorite added");
        Ok(())
    }

    /// Remove a favorite. Removing an id that is not there succeeds.
    pub async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError> {
        self.favorites
            .remove(user_id, recipe_id)
            .await
            .inspect_err(|e| tracing::error!(user_id, recipe_id, error = %e, "Failed to remove favorite"))?;
        tracing::debug!(user_id, recipe_id, "Favorite removed");
        Ok(())
    }

    /// Current favorite set; empty when the store cannot be read.
    pub async fn list_favorites(&self, user_id: &str) -> Vec<FavoriteEntry> {
        match self.favorites.list(user_id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Favorites unreadable, returning empty list");
                Vec::new()
            }
        }
    }

    pub async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> bool {
        self.list_favorites(user_id)
            .await
            .iter()
            .any(|entry| entry.recipe_id == recipe_id)
    }

    /// Fetch details for each favorite.
    ///
    /// Entries that do not resolve are left out; the output keeps the
    /// order of `favorites`.
    pub async fn hydrate(&self, favorites: &[FavoriteEntry]) -> Vec<RecipeDetail> {
        let catalog = Arc::clone(&self.catalog);

        let details: Vec<Option<RecipeDetail>> = stream::iter(favorites.iter().cloned())
            .map(|entry| {
                let catalog = Arc::clone(&catalog);
                async move {
                    let Some(id) = entry.numeric_id() else {
                        tracing::warn!(recipe_id = %entry.recipe_id, "Skipping favorite with non-numeric id");
                        return None;
                    };
                    match catalog.recipe_detail(id).await {
                        Ok(detail) => Some(detail),
                        Err(e) => {
                            tracing::warn!(recipe_id = id, error = %e, "Dropping favorite that failed to hydrate");
                            None
                        }
                    }
                }
            })
            .buffered(self.hydration_concurrency)
            .collect()
            .await;

        let hydrated: Vec<RecipeDetail> = details.into_iter().flatten().collect();
        tracing::debug!(
            requested = favorites.len(),
            hydrated = hydrated.len(),
            "Favorites hydrated"
        );
        hydrated
    }

    /// List then hydrate the user's favorites.
    pub async fn favorite_recipes(&self, user_id: &str) -> Vec<RecipeDetail> {
        let entries = self.list_favorites(user_id).await;
        self.hydrate(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{RecipeId, RecipeSummary, SearchPage, SearchParams};
    use crate::error::RemoteFetchError;

    /// Keeps the first entry per id and lists by `addedAt`, like the
    /// document stores do.
    #[derive(Default)]
    struct MemoryFavorites {
        entries: Mutex<HashMap<String, Vec<FavoriteEntry>>>,
    }

    #[async_trait]
    impl FavoritesRepository for MemoryFavorites {
        async fn insert(&self, user_id: &str, entry: FavoriteEntry) -> Result<(), StoreError> {
            let mut entries = self.entries.lock().unwrap();
            let list = entries.entry(user_id.to_string()).or_default();
            if !list.iter().any(|e| e.recipe_id == entry.recipe_id) {
                list.push(entry);
            }
            Ok(())
        }

        async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError> {
            if let Some(list) = self.entries.lock().unwrap().get_mut(user_id) {
                list.retain(|e| e.recipe_id != recipe_id);
            }
            Ok(())
        }

        async fn list(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, StoreError> {
            let mut list = self
                .entries
                .lock()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default();
            list.sort_by(|a, b| a.added_at.cmp(&b.added_at));
            Ok(list)
        }
    }

    struct BrokenFavorites;

    #[async_trait]
    impl FavoritesRepository for BrokenFavorites {
        async fn insert(&self, _: &str, _: FavoriteEntry) -> Result<(), StoreError> {
            Err(StoreError::Write("permission denied".into()))
        }

        async fn remove(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Write("permission denied".into()))
        }

        async fn list(&self, _: &str) -> Result<Vec<FavoriteEntry>, StoreError> {
            Err(StoreError::Read("offline".into()))
        }
    }

    /// Catalog that knows a fixed set of recipes; lower ids answer slower.
    struct StubCatalog {
        known: HashMap<RecipeId, RecipeDetail>,
    }

    impl StubCatalog {
        fn with(ids: &[RecipeId]) -> Self {
            let known = ids
                .iter()
                .map(|&id| {
                    let summary = RecipeSummary::new(id, format!("Recipe {id}"));
                    (id, RecipeDetail::from_summary(summary))
                })
                .collect();
            Self { known }
        }
    }

    #[async_trait]
    impl RecipeCatalog for StubCatalog {
        async fn search(&self, _: &SearchParams) -> Result<SearchPage, RemoteFetchError> {
            unreachable!("not used by favorites")
        }

        async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RemoteFetchError> {
            tokio::time::sleep(Duration::from_millis(50u64.saturating_sub(id * 10))).await;
            self.known.get(&id).cloned().ok_or(RemoteFetchError::Status {
                status: 404,
                message: "A recipe with that id does not exist".into(),
            })
        }
    }

    fn service(catalog_ids: &[RecipeId]) -> FavoritesService {
        FavoritesService::new(
            Arc::new(MemoryFavorites::default()),
            Arc::new(StubCatalog::with(catalog_ids)),
        )
    }

    fn ids(entries: &[FavoriteEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.recipe_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_then_list_contains_id() {
        let service = service(&[]);
        service.add_favorite("u1", "101").await.unwrap();

        assert_eq!(ids(&service.list_favorites("u1").await), vec!["101"]);
        assert!(service.list_favorites("someone-else").await.is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_is_same_as_once() {
        let service = service(&[]);
        service.add_favorite("u1", "101").await.unwrap();
        service.add_favorite("u1", "101").await.unwrap();

        assert_eq!(ids(&service.list_favorites("u1").await), vec!["101"]);
    }

    #[tokio::test]
    async fn test_readding_keeps_original_entry_and_order() {
        let service = service(&[1, 2]);
        service.add_favorite("u1", "1").await.unwrap();
        let first = service.list_favorites("u1").await[0].clone();
        tokio::time::sleep(Duration::from_millis(5)).await;
        service.add_favorite("u1", "2").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        service.add_favorite("u1", "1").await.unwrap();

        let entries = service.list_favorites("u1").await;
        assert_eq!(ids(&entries), vec!["1", "2"]);
        assert_eq!(entries[0].added_at, first.added_at);

        let details = service.favorite_recipes("u1").await;
        assert_eq!(details.iter().map(|d| d.id()).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_remove_then_list_excludes_id() {
        let service = service(&[]);
        service.add_favorite("u1", "101").await.unwrap();
        service.add_favorite("u1", "202").await.unwrap();
        service.remove_favorite("u1", "101").await.unwrap();

        assert_eq!(ids(&service.list_favorites("u1").await), vec!["202"]);
        assert!(!service.is_favorite("u1", "101").await);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_an_error() {
        let service = service(&[]);
        assert!(service.remove_favorite("u1", "999").await.is_ok());
    }

    #[tokio::test]
    async fn test_read_failure_swallowed_write_failure_propagated() {
        let service = FavoritesService::new(Arc::new(BrokenFavorites), Arc::new(StubCatalog::with(&[])));

        assert!(service.list_favorites("u1").await.is_empty());
        assert!(matches!(
            service.add_favorite("u1", "1").await,
            Err(StoreError::Write(_))
        ));
        assert!(matches!(
            service.remove_favorite("u1", "1").await,
            Err(StoreError::Write(_))
        ));
    }

    #[tokio::test]
    async fn test_hydrate_drops_unresolvable_ids() {
        let service = service(&[1]);
        let favorites = vec![FavoriteEntry::new("1"), FavoriteEntry::new("2")];

        let details = service.hydrate(&favorites).await;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id(), 1);
    }

    #[tokio::test]
    async fn test_hydrate_skips_non_numeric_ids() {
        let service = service(&[3]);
        let favorites = vec![FavoriteEntry::new("pasta"), FavoriteEntry::new("3")];

        let details = service.hydrate(&favorites).await;

        assert_eq!(details.iter().map(|d| d.id()).collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn test_hydrate_preserves_input_order() {
        // Later ids answer first; output must still follow the input.
        let service = service(&[1, 2, 3, 4]).with_hydration_concurrency(4);
        let favorites: Vec<FavoriteEntry> =
            ["4", "1", "3", "2"].into_iter().map(FavoriteEntry::new).collect();

        let details = service.hydrate(&favorites).await;

        assert_eq!(details.iter().map(|d| d.id()).collect::<Vec<_>>(), vec![4, 1, 3, 2]);
    }

    #[tokio::test]
    async fn test_favorite_recipes_lists_and_hydrates() {
        let service = service(&[7]);
        service.add_favorite("u1", "7").await.unwrap();
        service.add_favorite("u1", "8").await.unwrap();

        let details = service.favorite_recipes("u1").await;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].summary.title, "Recipe 7");
        // The unresolvable favorite is still in the set.
        assert!(service.is_favorite("u1", "8").await);
    }
}
