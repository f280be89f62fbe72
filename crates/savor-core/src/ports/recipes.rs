//! Remote recipe API port.

use async_trait::async_trait;

use crate::domain::{RecipeDetail, RecipeId, SearchPage, SearchParams};
use crate::error::RemoteFetchError;

/// Read access to the third-party recipe catalog.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Run one search request.
    async fn search(&self, params: &SearchParams) -> Result<SearchPage, RemoteFetchError>;

    /// Fetch the full record of a single recipe.
    async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RemoteFetchError>;
}
