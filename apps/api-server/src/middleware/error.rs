//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use savor_core::ports::{AuthError, NotifyError, StorageError};
use savor_core::{RemoteFetchError, StoreError};
use savor_infra::TaskCancelled;
use savor_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The recipe API failed; the client offers "go back", not retry.
    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error("Upstream timeout: {0}")]
    GatewayTimeout(String),

    /// A store or collaborator is temporarily unusable.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::BadGateway(detail) => ErrorResponse::bad_gateway(detail),
            AppError::GatewayTimeout(detail) => ErrorResponse::gateway_timeout(detail),
            AppError::Unavailable(detail) => ErrorResponse::service_unavailable(detail),
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RemoteFetchError> for AppError {
    fn from(err: RemoteFetchError) -> Self {
        tracing::warn!(error = %err, "Recipe API request failed");
        match &err {
            RemoteFetchError::Timeout => AppError::GatewayTimeout(err.to_string()),
            e if e.is_not_found() => AppError::NotFound(err.to_string()),
            _ => AppError::BadGateway(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Document store error");
        AppError::Unavailable(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::MissingAuth => AppError::Unauthorized(err.to_string()),
            AuthError::EmailInUse => AppError::Conflict(err.to_string()),
            AuthError::Rejected(msg) => AppError::BadRequest(msg),
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath(_) => AppError::BadRequest(err.to_string()),
            StorageError::Upload(_) => {
                tracing::error!(error = %err, "Object upload failed");
                AppError::Unavailable(err.to_string())
            }
        }
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::InvalidTopic(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<TaskCancelled> for AppError {
    fn from(err: TaskCancelled) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
