//! Profile handlers.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use savor_core::domain::{ProfileUpdate, UserProfile};
use savor_shared::dto::UpdateProfileRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn missing_profile(user_id: &str) -> AppError {
    AppError::NotFound(format!("No profile for user {user_id}"))
}

/// GET /api/profile
pub async fn get(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profile = state
        .profiles
        .get(&identity.user_id)
        .await?
        .ok_or_else(|| missing_profile(&identity.user_id))?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PATCH /api/profile
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let update = ProfileUpdate {
        name: req.name,
        photo_url: None,
        preferences: req.preferences,
    };

    let profile = apply_update(&state, &identity.user_id, update).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/profile/photo - raw image bytes as the body.
pub async fn upload_photo(
    state: web::Data<AppState>,
    identity: Identity,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Photo body is empty".to_string()));
    }
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let path = format!("profile_photos/{}.jpg", identity.user_id);
    let url = state
        .storage
        .upload(&path, body.to_vec(), &content_type)
        .await?;

    let profile = apply_update(&state, &identity.user_id, ProfileUpdate::photo(url)).await?;
    tracing::info!(user_id = %identity.user_id, "Profile photo updated");
    Ok(HttpResponse::Ok().json(profile))
}

async fn apply_update(
    state: &AppState,
    user_id: &str,
    update: ProfileUpdate,
) -> AppResult<UserProfile> {
    state
        .profiles
        .update(user_id, update)
        .await?
        .ok_or_else(|| missing_profile(user_id))
}
