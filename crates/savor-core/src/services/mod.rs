//! Application services composed from ports.

mod favorites;
mod recipes;

pub use favorites::{DEFAULT_HYDRATION_CONCURRENCY, FavoritesService};
pub use recipes::RecipeSearchService;
