//! Recipe search and detail lookups.

use std::sync::Arc;

use crate::domain::search::DEFAULT_RESULT_LIMIT;
use crate::domain::{RecipeDetail, RecipeId, SearchFilters, SearchPage, SearchParams, local_filter};
use crate::error::RemoteFetchError;
use crate::ports::RecipeCatalog;

/// Builds search requests from filters and runs them against the catalog.
#[derive(Clone)]
pub struct RecipeSearchService {
    catalog: Arc<dyn RecipeCatalog>,
    result_limit: u32,
}

impl RecipeSearchService {
    pub fn new(catalog: Arc<dyn RecipeCatalog>) -> Self {
        Self {
            catalog,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_result_limit(mut self, limit: u32) -> Self {
        self.result_limit = limit.max(1);
        self
    }

    /// Run one remote search for `filters`.
    pub async fn search(&self, filters: &SearchFilters) -> Result<SearchPage, RemoteFetchError> {
        let params = SearchParams::from_filters(filters, self.result_limit);
        tracing::debug!(
            query = %params.query,
            ingredients = %params.include_ingredients,
            diet = %params.diet,
            type_tag = %params.type_tag,
            "Searching recipes"
        );
        let page = self.catalog.search(&params).await?;
        tracing::debug!(
            returned = page.results.len(),
            total = page.total_results,
            "Search completed"
        );
        Ok(page)
    }

    /// Search, then narrow the fetched page by title without another request.
    ///
    /// Paging fields still describe the remote result set.
    pub async fn search_filtered(
        &self,
        filters: &SearchFilters,
        title_query: &str,
    ) -> Result<SearchPage, RemoteFetchError> {
        let mut page = self.search(filters).await?;
        page.results = local_filter(&page.results, title_query);
        Ok(page)
    }

    pub async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RemoteFetchError> {
        self.catalog.recipe_detail(id).await
    }
}
