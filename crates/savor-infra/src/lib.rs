//! # Savor Infrastructure
//!
//! Concrete implementations of the ports defined in `savor-core`.
//! This crate contains the recipe API client, document stores, identity,
//! object storage, and notification integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services besides the recipe API, in-memory stores only
//! - `redis` - Redis-backed favorites and profile documents

pub mod auth;
pub mod notify;
pub mod spoonacular;
pub mod storage;
pub mod store;
pub mod task;

// Re-exports - In-Memory and local
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, LocalIdentityProvider};
pub use notify::InMemoryTopicHub;
pub use spoonacular::{SpoonacularClient, SpoonacularConfig};
pub use storage::{LocalObjectStorage, LocalStorageConfig};
pub use store::{InMemoryFavoritesRepository, InMemoryProfileRepository};
pub use task::{CancelToken, TaskCancelled, ViewScope, ViewTask};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisFavoritesRepository, RedisProfileRepository};
