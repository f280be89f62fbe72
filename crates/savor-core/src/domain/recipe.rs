use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a recipe by the remote recipe API.
pub type RecipeId = u64;

/// Recipe as listed in search results. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image_url: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    /// 0 to 100.
    pub health_score: u8,
    pub diets: BTreeSet<String>,
    pub summary_html: String,
}

impl RecipeSummary {
    /// Create a summary carrying only an id and a title.
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: String::new(),
            ready_in_minutes: 0,
            servings: 0,
            health_score: 0,
            diets: BTreeSet::new(),
            summary_html: String::new(),
        }
    }
}

/// Full recipe, fetched lazily for the detail view and for favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub dish_types: Vec<String>,
    pub instructions: Vec<Step>,
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
}

impl RecipeDetail {
    pub fn from_summary(summary: RecipeSummary) -> Self {
        Self {
            summary,
            dish_types: Vec::new(),
            instructions: Vec::new(),
            extended_ingredients: Vec::new(),
            nutrition: None,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.summary.id
    }
}

/// One instruction step, numbered from 1 within its instruction group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub number: u32,
    pub step: String,
    pub ingredients: Vec<String>,
    pub equipment: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_of_daily_needs: Option<f64>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<RecipeSummary>,
    pub offset: u32,
    pub number: u32,
    pub total_results: u32,
}
