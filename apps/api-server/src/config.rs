//! Application configuration loaded from environment variables.

use std::env;

use savor_core::domain::DEFAULT_RESULT_LIMIT;
use savor_core::services::DEFAULT_HYDRATION_CONCURRENCY;
use savor_infra::{JwtConfig, LocalStorageConfig, SpoonacularConfig};

#[cfg(feature = "redis")]
use savor_infra::RedisConfig;

/// Largest request body accepted for a profile photo.
pub const DEFAULT_PHOTO_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub spoonacular: SpoonacularConfig,
    /// `number` sent with every search.
    pub search_result_limit: u32,
    /// Detail fetches in flight while hydrating favorites.
    pub hydration_concurrency: usize,
    pub jwt: JwtConfig,
    pub storage: LocalStorageConfig,
    /// Body limit for photo uploads, in bytes.
    pub photo_max_bytes: usize,
    /// Present only when `REDIS_URL` is set.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            spoonacular: SpoonacularConfig::from_env(),
            search_result_limit: parse_var("SEARCH_RESULT_LIMIT")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_RESULT_LIMIT),
            hydration_concurrency: parse_var("HYDRATION_CONCURRENCY")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_HYDRATION_CONCURRENCY),
            jwt: JwtConfig::from_env(),
            storage: LocalStorageConfig::from_env(),
            photo_max_bytes: parse_var("PHOTO_MAX_BYTES")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PHOTO_MAX_BYTES),
            #[cfg(feature = "redis")]
            redis: env::var("REDIS_URL").ok().map(|_| RedisConfig::from_env()),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
