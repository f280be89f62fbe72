//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Display name; defaults to the email's local part.
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: String,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: u64, user_id: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user_id,
        }
    }
}

/// Query string of `GET /api/recipes/search`.
///
/// `ingredients` and `diet` are comma-separated lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeSearchQuery {
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    /// Free text sent to the recipe API.
    #[serde(default)]
    pub q: Option<String>,
    /// Title filter applied to the fetched page.
    #[serde(default)]
    pub filter: Option<String>,
}

impl RecipeSearchQuery {
    pub fn ingredient_list(&self) -> Vec<String> {
        split_list(self.ingredients.as_deref())
    }

    pub fn diet_list(&self) -> Vec<String> {
        split_list(self.diet.as_deref())
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Partial profile update. Absent fields are left untouched; a `null`
/// preference value removes that key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferences: Option<Map<String, Value>>,
}
