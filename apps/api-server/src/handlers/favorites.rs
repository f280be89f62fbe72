//! Favorites handlers. All routes act on the signed-in user's set.

use actix_web::{HttpResponse, web};

use savor_infra::ViewScope;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/favorites - favorites hydrated to full recipes, in favorite order.
pub async fn list_recipes(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let scope = ViewScope::new();
    let favorites = state.favorites.clone();
    let recipes = scope
        .spawn(async move { favorites.favorite_recipes(&identity.user_id).await })
        .await?;

    Ok(HttpResponse::Ok().json(recipes))
}

/// GET /api/favorites/ids
pub async fn list_ids(state: web::Data<AppState>, identity: Identity) -> HttpResponse {
    let entries = state.favorites.list_favorites(&identity.user_id).await;
    HttpResponse::Ok().json(entries)
}

/// PUT /api/favorites/{recipe_id}
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .favorites
        .add_favorite(&identity.user_id, &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/favorites/{recipe_id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .favorites
        .remove_favorite(&identity.user_id, &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
