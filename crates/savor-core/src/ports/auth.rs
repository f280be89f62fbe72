//! Authentication and identity ports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Claims stored in access tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: String,
    pub email: String,
    pub exp: i64,
    /// Unique token id, used to revoke a single session.
    pub token_id: String,
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub expires_in: u64,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Generate access token for a user.
    fn generate_token(&self, user_id: &str, email: &str) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of newly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Identity provider - sign-up, sign-in and sign-out returning a user identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Invalidate the session behind `token`. Signing out twice is not an error.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Check a token and return its claims.
    async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Start a password reset for `email`.
    ///
    /// Succeeds whether or not an account exists, so callers cannot probe
    /// for registered addresses.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

/// Authentication errors.
///
/// `Rejected` carries a human-readable message meant to be shown as-is.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("The email address is already in use by another account")]
    EmailInUse,

    #[error("{0}")]
    Rejected(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
