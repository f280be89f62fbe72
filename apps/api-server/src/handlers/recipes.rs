//! Recipe search and detail handlers.

use actix_web::{HttpResponse, web};

use savor_core::domain::{RecipeId, SearchFilters};
use savor_infra::ViewScope;
use savor_shared::dto::RecipeSearchQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn filters_from(query: &RecipeSearchQuery) -> SearchFilters {
    SearchFilters::new()
        .with_ingredients(query.ingredient_list())
        .with_category(query.category.clone())
        .with_dietary(query.diet_list())
        .with_query(query.q.clone().unwrap_or_default())
}

/// GET /api/recipes/search
///
/// `filter` narrows the fetched page by title without another upstream call.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<RecipeSearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filters = filters_from(&query);
    let title_filter = query.filter.unwrap_or_default();

    let scope = ViewScope::new();
    let recipes = state.recipes.clone();
    let page = scope
        .spawn(async move { recipes.search_filtered(&filters, &title_filter).await })
        .await??;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/recipes/{id}
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<RecipeId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let scope = ViewScope::new();
    let recipes = state.recipes.clone();
    let recipe = scope
        .spawn(async move { recipes.recipe_detail(id).await })
        .await??;

    Ok(HttpResponse::Ok().json(recipe))
}
