//! HTTP client for the Spoonacular recipe API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use savor_core::RemoteFetchError;
use savor_core::domain::{RecipeDetail, RecipeId, SearchPage, SearchParams};
use savor_core::ports::RecipeCatalog;

use super::models::{RecipeDetailPayload, SearchEnvelope};

/// Recipe API configuration.
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    /// Base URL without trailing path (e.g., https://api.spoonacular.com)
    pub base_url: String,
    pub api_key: String,
    /// Applied to every request; an elapsed timeout is a fetch error.
    pub request_timeout: Duration,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spoonacular.com".to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SpoonacularConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_key = std::env::var("SPOONACULAR_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("SPOONACULAR_API_KEY is not set; recipe requests will be rejected upstream");
        }

        Self {
            base_url: std::env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".to_string()),
            api_key,
            request_timeout: Duration::from_secs(
                std::env::var("SPOONACULAR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Error body the API sends with non-2xx statuses.
#[derive(Deserialize)]
struct ApiFailure {
    message: String,
}

/// Spoonacular-backed recipe catalog.
pub struct SpoonacularClient {
    http: reqwest::Client,
    config: SpoonacularConfig,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Result<Self, RemoteFetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteFetchError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment configuration.
    pub fn from_env() -> Result<Self, RemoteFetchError> {
        Self::new(SpoonacularConfig::from_env())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteFetchError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(path = %path, "Calling recipe API");

        let response = self
            .http
            .get(&url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiFailure>(&body)
                .map(|f| f.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::warn!(path = %path, status = status.as_u16(), message = %message, "Recipe API error");
            return Err(RemoteFetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Recipe API response did not match schema");
            RemoteFetchError::Decode(e.to_string())
        })
    }
}

fn transport_error(e: reqwest::Error) -> RemoteFetchError {
    if e.is_timeout() {
        RemoteFetchError::Timeout
    } else {
        RemoteFetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl RecipeCatalog for SpoonacularClient {
    async fn search(&self, params: &SearchParams) -> Result<SearchPage, RemoteFetchError> {
        let envelope: SearchEnvelope = self
            .get_json("recipes/complexSearch", &params.query_pairs())
            .await?;
        Ok(envelope.into())
    }

    async fn recipe_detail(&self, id: RecipeId) -> Result<RecipeDetail, RemoteFetchError> {
        let payload: RecipeDetailPayload = self
            .get_json(
                &format!("recipes/{id}/information"),
                &[("includeNutrition", "true".to_string())],
            )
            .await?;
        Ok(payload.into())
    }
}
