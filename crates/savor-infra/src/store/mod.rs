//! Favorites and profile document stores - Redis and in-memory fallback.

mod memory;

pub use memory::{InMemoryFavoritesRepository, InMemoryProfileRepository};

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisFavoritesRepository, RedisProfileRepository, connect};
