//! Notification topic subscriptions.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/notifications/topics
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let topics = state.notifier.subscriptions(&identity.user_id).await?;
    Ok(HttpResponse::Ok().json(topics))
}

/// PUT /api/notifications/topics/{topic}
pub async fn subscribe(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .notifier
        .subscribe(&identity.user_id, &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/notifications/topics/{topic}
pub async fn unsubscribe(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .notifier
        .unsubscribe(&identity.user_id, &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
