use async_trait::async_trait;

use crate::domain::{FavoriteEntry, ProfileUpdate, UserProfile};
use crate::error::StoreError;

/// Per-user favorite set in the document store.
///
/// Adds never overwrite an existing entry; no ordering is promised between
/// devices.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Insert `entry` unless the user already has one for `entry.recipe_id`,
    /// in which case the stored entry and its `addedAt` are kept.
    async fn insert(&self, user_id: &str, entry: FavoriteEntry) -> Result<(), StoreError>;

    /// Delete the entry. Deleting an absent id succeeds.
    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError>;

    /// All entries of the user, oldest first.
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, StoreError>;
}

/// User profile documents keyed by user id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create (or replace) the profile document.
    async fn create(&self, profile: UserProfile) -> Result<UserProfile, StoreError>;

    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Apply a partial update and return the resulting profile.
    ///
    /// Returns `Ok(None)` when no profile exists for `user_id`.
    async fn update(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, StoreError>;
}
