//! Redis-backed document stores.
//!
//! Layout:
//! - `users:{user_id}:favorites` - hash, field = recipe id, value = JSON `{recipeId, addedAt}`
//! - `users:{user_id}:profile` - hash, one field per profile field, `preferences` as JSON

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::Deserialize;

use savor_core::StoreError;
use savor_core::domain::{FavoriteEntry, ProfileUpdate, UserProfile};
use savor_core::ports::{FavoritesRepository, ProfileRepository};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whether to fallback to in-memory stores if Redis is unavailable
    pub fallback_to_memory: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            fallback_to_memory: true,
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            fallback_to_memory: std::env::var("REDIS_FALLBACK_TO_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

/// Open a managed connection, shared by the Redis repositories.
pub async fn connect(config: &RedisConfig) -> Result<ConnectionManager, StoreError> {
    let client =
        Client::open(config.url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;

    // Use timeout to prevent hanging if Redis is unreachable
    let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
        .await
        .map_err(|_| StoreError::Connection("Connection timed out".to_string()))?
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    tracing::info!(url = %config.url, "Connected to Redis document store");
    Ok(conn)
}

fn favorites_key(user_id: &str) -> String {
    format!("users:{user_id}:favorites")
}

fn profile_key(user_id: &str) -> String {
    format!("users:{user_id}:profile")
}

/// Favorite document written by older clients.
#[derive(Deserialize)]
struct LegacyFavorite {
    id: String,
}

/// Decode a stored favorite, accepting the legacy `{id, name}` shape.
///
/// Legacy entries have no timestamp; they are rewritten in the canonical
/// shape, still without one, the next time the favorite is added.
pub(crate) fn decode_favorite(raw: &str) -> Result<FavoriteEntry, serde_json::Error> {
    match serde_json::from_str::<FavoriteEntry>(raw) {
        Ok(entry) => Ok(entry),
        Err(err) => serde_json::from_str::<LegacyFavorite>(raw)
            .map(|legacy| FavoriteEntry {
                recipe_id: legacy.id,
                added_at: None,
            })
            .map_err(|_| err),
    }
}

/// Canonical document for a stored legacy favorite, `None` when `raw` is
/// already canonical or unreadable.
fn upgrade_legacy(raw: &str) -> Option<String> {
    if serde_json::from_str::<FavoriteEntry>(raw).is_ok() {
        return None;
    }
    let entry = decode_favorite(raw).ok()?;
    serde_json::to_string(&entry).ok()
}

/// Oldest first; legacy entries without a timestamp lead.
fn sort_favorites(entries: &mut [FavoriteEntry]) {
    entries.sort_by(|a, b| {
        a.added_at
            .cmp(&b.added_at)
            .then_with(|| a.recipe_id.cmp(&b.recipe_id))
    });
}

pub struct RedisFavoritesRepository {
    conn: ConnectionManager,
}

impl RedisFavoritesRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl FavoritesRepository for RedisFavoritesRepository {
    async fn insert(&self, user_id: &str, entry: FavoriteEntry) -> Result<(), StoreError> {
        let key = favorites_key(user_id);
        let document =
            serde_json::to_string(&entry).map_err(|e| StoreError::Write(e.to_string()))?;
        let mut conn = self.conn.clone();
        let inserted: bool = conn
            .hset_nx(&key, &entry.recipe_id, document)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        if inserted {
            return Ok(());
        }

        let existing: Option<String> = conn
            .hget(&key, &entry.recipe_id)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        if let Some(upgraded) = existing.as_deref().and_then(upgrade_legacy) {
            tracing::debug!(user_id, recipe_id = %entry.recipe_id, "Upgrading legacy favorite");
            conn.hset::<_, _, _, ()>(&key, &entry.recipe_id, upgraded)
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;
        }
        Ok(())
    }

    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.hdel::<_, _, ()>(favorites_key(user_id), recipe_id)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, StoreError> {
        let mut conn = self.conn.clone();
        let documents: HashMap<String, String> = conn
            .hgetall(favorites_key(user_id))
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        let mut entries: Vec<FavoriteEntry> = documents
            .into_iter()
            .filter_map(|(field, raw)| match decode_favorite(&raw) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::error!(user_id, field = %field, error = %e, "Unreadable favorite document");
                    None
                }
            })
            .collect();
        sort_favorites(&mut entries);
        Ok(entries)
    }
}

pub struct RedisProfileRepository {
    conn: ConnectionManager,
}

impl RedisProfileRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

fn profile_fields(profile: &UserProfile) -> Result<Vec<(&'static str, String)>, StoreError> {
    let preferences = serde_json::to_string(&profile.preferences)
        .map_err(|e| StoreError::Write(e.to_string()))?;
    let mut fields = vec![
        ("userId", profile.user_id.clone()),
        ("name", profile.name.clone()),
        ("email", profile.email.clone()),
        ("preferences", preferences),
    ];
    if let Some(url) = &profile.photo_url {
        fields.push(("photoUrl", url.clone()));
    }
    Ok(fields)
}

fn profile_from_fields(mut fields: HashMap<String, String>) -> Result<UserProfile, StoreError> {
    let mut take = |name: &str| {
        fields
            .remove(name)
            .ok_or_else(|| StoreError::Read(format!("profile field `{name}` missing")))
    };
    let user_id = take("userId")?;
    let name = take("name")?;
    let email = take("email")?;
    let preferences = match fields.remove("preferences") {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Read(e.to_string()))?,
        None => Default::default(),
    };

    Ok(UserProfile {
        user_id,
        name,
        email,
        photo_url: fields.remove("photoUrl"),
        preferences,
    })
}

#[async_trait]
impl ProfileRepository for RedisProfileRepository {
    async fn create(&self, profile: UserProfile) -> Result<UserProfile, StoreError> {
        let key = profile_key(&profile.user_id);
        let fields = profile_fields(&profile)?;
        let mut conn = self.conn.clone();

        let _: () = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &fields)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(profile)
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(profile_key(user_id))
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        if fields.is_empty() {
            return Ok(None);
        }
        profile_from_fields(fields).map(Some)
    }

    async fn update(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<UserProfile>, StoreError> {
        // Preferences merge needs the current map, so read first.
        let Some(mut profile) = self.get(user_id).await? else {
            return Ok(None);
        };
        profile.apply(&update);

        let mut changed: Vec<(&'static str, String)> = Vec::new();
        if let Some(name) = &update.name {
            changed.push(("name", name.clone()));
        }
        if let Some(url) = &update.photo_url {
            changed.push(("photoUrl", url.clone()));
        }
        if update.preferences.is_some() {
            let preferences = serde_json::to_string(&profile.preferences)
                .map_err(|e| StoreError::Write(e.to_string()))?;
            changed.push(("preferences", preferences));
        }

        if !changed.is_empty() {
            let mut conn = self.conn.clone();
            conn.hset_multiple::<_, _, _, ()>(profile_key(user_id), &changed)
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;
        }

        Ok(Some(profile))
    }
}
