use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recipe::RecipeId;

/// A user-scoped bookmark referencing a recipe by id.
///
/// The id is kept as the store key string; it may not resolve to a recipe
/// the remote API still knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub recipe_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl FavoriteEntry {
    /// Create an entry stamped with the current time.
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            added_at: Some(Utc::now()),
        }
    }

    /// The numeric recipe id, if the stored key is one.
    pub fn numeric_id(&self) -> Option<RecipeId> {
        self.recipe_id.trim().parse().ok()
    }
}
