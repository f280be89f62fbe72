//! Authentication middleware and extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use savor_core::ports::{AuthError, TokenClaims};
use savor_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    /// The bearer token itself, needed to sign out.
    pub token: String,
}

impl Identity {
    fn from_claims(claims: TokenClaims, token: String) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            token,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your session has expired. Please sign in again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
            other => ErrorResponse::unauthorized(other.to_string()),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.identity.clone(),
            None => {
                tracing::error!("AppState not found in app data");
                return Box::pin(async {
                    Err(AuthenticationError(AuthError::InvalidToken(
                        "Server configuration error".to_string(),
                    )))
                });
            }
        };
        let token = bearer_token(req);

        Box::pin(async move {
            let token = token.map_err(AuthenticationError)?;
            let claims = identity.verify(&token).await.map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthenticationError(e)
            })?;
            Ok(Identity::from_claims(claims, token))
        })
    }
}
