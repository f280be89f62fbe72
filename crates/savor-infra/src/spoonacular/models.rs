//! Wire shapes of the recipe API and their mapping into domain types.
//!
//! Required fields are required here too: a response missing them is a
//! decode error, not a recipe with blanks.

use serde::Deserialize;

use savor_core::domain::{
    Ingredient, Nutrient, Nutrition, RecipeDetail, RecipeSummary, SearchPage, Step,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchEnvelope {
    pub results: Vec<RecipePayload>,
    pub offset: u32,
    pub number: u32,
    pub total_results: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipePayload {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipeDetailPayload {
    #[serde(flatten)]
    pub recipe: RecipePayload,
    #[serde(default)]
    pub dish_types: Vec<String>,
    pub extended_ingredients: Vec<IngredientPayload>,
    #[serde(default)]
    pub analyzed_instructions: Vec<InstructionGroup>,
    #[serde(default)]
    pub nutrition: Option<NutritionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IngredientPayload {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstructionGroup {
    pub steps: Vec<StepPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StepPayload {
    pub number: u32,
    pub step: String,
    #[serde(default)]
    pub ingredients: Vec<NamedItem>,
    #[serde(default)]
    pub equipment: Vec<NamedItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NutritionPayload {
    #[serde(default)]
    pub nutrients: Vec<NutrientPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NutrientPayload {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub percent_of_daily_needs: Option<f64>,
}

impl From<RecipePayload> for RecipeSummary {
    fn from(p: RecipePayload) -> Self {
        Self {
            id: p.id,
            title: p.title,
            image_url: p.image.unwrap_or_default(),
            ready_in_minutes: p.ready_in_minutes,
            servings: p.servings,
            health_score: p.health_score.round().clamp(0.0, 100.0) as u8,
            diets: p.diets.into_iter().collect(),
            summary_html: p.summary.unwrap_or_default(),
        }
    }
}

impl From<SearchEnvelope> for SearchPage {
    fn from(e: SearchEnvelope) -> Self {
        Self {
            results: e.results.into_iter().map(Into::into).collect(),
            offset: e.offset,
            number: e.number,
            total_results: e.total_results,
        }
    }
}

impl From<RecipeDetailPayload> for RecipeDetail {
    fn from(p: RecipeDetailPayload) -> Self {
        // Instruction groups are concatenated in order into one step list.
        let instructions = p
            .analyzed_instructions
            .into_iter()
            .flat_map(|group| group.steps)
            .map(|s| Step {
                number: s.number,
                step: s.step,
                ingredients: s.ingredients.into_iter().map(|i| i.name).collect(),
                equipment: s.equipment.into_iter().map(|e| e.name).collect(),
            })
            .collect();

        Self {
            summary: p.recipe.into(),
            dish_types: p.dish_types,
            instructions,
            extended_ingredients: p
                .extended_ingredients
                .into_iter()
                .map(|i| Ingredient {
                    id: i.id,
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                    image: i.image,
                })
                .collect(),
            nutrition: p.nutrition.map(|n| Nutrition {
                nutrients: n
                    .nutrients
                    .into_iter()
                    .map(|n| Nutrient {
                        name: n.name,
                        amount: n.amount,
                        unit: n.unit,
                        percent_of_daily_needs: n.percent_of_daily_needs,
                    })
                    .collect(),
            }),
        }
    }
}
