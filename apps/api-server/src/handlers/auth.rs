//! Authentication handlers.

use actix_web::{HttpResponse, web};

use savor_core::domain::UserProfile;
use savor_infra::auth::mask_email;
use savor_shared::ApiResponse;
use savor_shared::dto::{AuthResponse, LoginRequest, PasswordResetRequest, RegisterRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Creates the account, then the profile document that belongs to it.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.identity.sign_up(&req.email, &req.password).await?;

    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| default_display_name(&session.email));
    state
        .profiles
        .create(UserProfile::new(&session.user_id, name, &session.email))
        .await
        .inspect_err(|e| {
            tracing::error!(
                user_id = %session.user_id,
                error = %e,
                "Account created but profile document was not"
            )
        })?;

    tracing::info!(user_id = %session.user_id, email = %mask_email(&session.email), "User registered");
    Ok(HttpResponse::Created().json(AuthResponse::bearer(
        session.access_token,
        session.expires_in,
        session.user_id,
    )))
}

fn default_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.identity.sign_in(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(
        session.access_token,
        session.expires_in,
        session.user_id,
    )))
}

/// POST /api/auth/logout - Protected route
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    state.identity.sign_out(&identity.token).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/auth/password-reset
///
/// Replies the same way whether or not the address has an account.
pub async fn password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    state.identity.request_password_reset(&body.email).await?;
    Ok(HttpResponse::Accepted().json(ApiResponse::ok_with_message(
        (),
        "If an account exists for this address, a reset email is on its way.",
    )))
}
