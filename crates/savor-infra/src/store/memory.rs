//! In-memory document stores - used when Redis is not configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use savor_core::StoreError;
use savor_core::domain::{FavoriteEntry, ProfileUpdate, UserProfile};
use savor_core::ports::{FavoritesRepository, ProfileRepository};

/// Favorites partitioned by user, each list kept in insertion order.
pub struct InMemoryFavoritesRepository {
    store: RwLock<HashMap<String, Vec<FavoriteEntry>>>,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFavoritesRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn insert(&self, user_id: &str, entry: FavoriteEntry) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        let favorites = store.entry(user_id.to_string()).or_default();

        if !favorites.iter().any(|e| e.recipe_id == entry.recipe_id) {
            favorites.push(entry);
        }
        Ok(())
    }

    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        if let Some(favorites) = store.get_mut(user_id) {
            favorites.retain(|e| e.recipe_id != recipe_id);
        }
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(user_id).cloned().unwrap_or_default())
    }
}

/// Profiles keyed by user id.
pub struct InMemoryProfileRepository {
    store: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: UserProfile) -> Result<UserProfile, StoreError> {
        let mut store = self.store.write().await;
        store.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(user_id).cloned())
    }

    async fn update(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, StoreError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(user_id).map(|profile| {
            profile.apply(&update);
            profile.clone()
        }))
    }
}
