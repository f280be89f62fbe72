//! Domain entities - the core business objects.

mod favorite;
mod profile;
mod recipe;
pub mod search;

pub use favorite::FavoriteEntry;
pub use profile::{ProfileUpdate, UserProfile};
pub use recipe::{
    Ingredient, Nutrient, Nutrition, RecipeDetail, RecipeId, RecipeSummary, SearchPage, Step,
};
pub use search::{DEFAULT_RESULT_LIMIT, DIET_KEYWORDS, SearchFilters, SearchParams, local_filter};
