//! Application state - shared across all handlers.

use std::sync::Arc;

use savor_core::ports::{
    FavoritesRepository, IdentityProvider, ObjectStorage, ProfileRepository, RecipeCatalog,
    TopicNotifier,
};
use savor_core::services::{FavoritesService, RecipeSearchService};
use savor_infra::{
    Argon2PasswordService, InMemoryFavoritesRepository, InMemoryProfileRepository,
    InMemoryTopicHub, JwtTokenService, LocalIdentityProvider, LocalObjectStorage,
    SpoonacularClient,
};

#[cfg(feature = "redis")]
use savor_infra::{RedisFavoritesRepository, RedisProfileRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeSearchService,
    pub favorites: FavoritesService,
    pub profiles: Arc<dyn ProfileRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn ObjectStorage>,
    pub notifier: Arc<dyn TopicNotifier>,
}

type DocumentStores = (Arc<dyn FavoritesRepository>, Arc<dyn ProfileRepository>);

impl AppState {
    pub fn new(
        catalog: Arc<dyn RecipeCatalog>,
        favorites: Arc<dyn FavoritesRepository>,
        profiles: Arc<dyn ProfileRepository>,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
        notifier: Arc<dyn TopicNotifier>,
    ) -> Self {
        Self {
            recipes: RecipeSearchService::new(catalog.clone()),
            favorites: FavoritesService::new(favorites, catalog),
            profiles,
            identity,
            storage,
            notifier,
        }
    }

    pub fn with_limits(mut self, result_limit: u32, hydration_concurrency: usize) -> Self {
        self.recipes = self.recipes.with_result_limit(result_limit);
        self.favorites = self.favorites.with_hydration_concurrency(hydration_concurrency);
        self
    }

    /// Build the application state with appropriate implementations.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog: Arc<dyn RecipeCatalog> =
            Arc::new(SpoonacularClient::new(config.spoonacular.clone())?);

        let (favorites, profiles) = Self::document_stores(config).await?;

        let identity = Arc::new(LocalIdentityProvider::new(
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
        ));
        let storage = Arc::new(LocalObjectStorage::new(config.storage.clone()));

        tracing::info!(
            result_limit = config.search_result_limit,
            hydration_concurrency = config.hydration_concurrency,
            "Application state initialized"
        );

        Ok(Self::new(
            catalog,
            favorites,
            profiles,
            identity,
            storage,
            Arc::new(InMemoryTopicHub::default()),
        )
        .with_limits(config.search_result_limit, config.hydration_concurrency))
    }

    #[cfg(feature = "redis")]
    async fn document_stores(config: &AppConfig) -> anyhow::Result<DocumentStores> {
        let Some(redis) = &config.redis else {
            tracing::warn!("REDIS_URL not set. Favorites and profiles are kept in memory.");
            return Ok(Self::memory_stores());
        };

        match savor_infra::store::connect(redis).await {
            Ok(conn) => Ok((
                Arc::new(RedisFavoritesRepository::new(conn.clone())),
                Arc::new(RedisProfileRepository::new(conn)),
            )),
            Err(e) if redis.fallback_to_memory => {
                tracing::error!(error = %e, "Redis unavailable. Using in-memory fallback.");
                Ok(Self::memory_stores())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn document_stores(_config: &AppConfig) -> anyhow::Result<DocumentStores> {
        tracing::info!("Running without redis feature - using in-memory stores");
        Ok(Self::memory_stores())
    }

    fn memory_stores() -> DocumentStores {
        (
            Arc::new(InMemoryFavoritesRepository::new()),
            Arc::new(InMemoryProfileRepository::new()),
        )
    }
}
