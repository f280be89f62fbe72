//! Local identity provider: Argon2 password hashes and JWT sessions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use savor_core::ports::{
    AuthError, AuthSession, IdentityProvider, PasswordService, TokenClaims, TokenService,
};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Argon2id password hashing with default parameters.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Mask an email for logging to avoid PII in logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            if local.chars().count() > 1 {
                format!("{first}***@{domain}")
            } else {
                format!("***@{domain}")
            }
        }
        None => "***".to_string(),
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Clone)]
struct Account {
    user_id: String,
    email: String,
    password_hash: String,
}

/// In-process identity provider.
///
/// Accounts live in memory; sign-out revokes the token's id until the
/// process restarts.
pub struct LocalIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    revoked: RwLock<HashSet<String>>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl LocalIdentityProvider {
    pub fn new(passwords: Arc<dyn PasswordService>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            revoked: RwLock::new(HashSet::new()),
            passwords,
            tokens,
        }
    }

    fn session_for(&self, account: &Account) -> Result<AuthSession, AuthError> {
        let access_token = self.tokens.generate_token(&account.user_id, &account.email)?;

        Ok(AuthSession {
            user_id: account.user_id.clone(),
            email: account.email.clone(),
            access_token,
            expires_in: self.tokens.expiration_seconds().max(0) as u64,
        })
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(AuthError::Rejected("The email address is badly formatted".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let key = email.to_lowercase();
        if self.accounts.read().await.contains_key(&key) {
            return Err(AuthError::EmailInUse);
        }

        // Hash outside the write lock; it is the slow part.
        let password_hash = self.passwords.hash(password)?;
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash,
        };

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailInUse);
        }
        let session = self.session_for(&account)?;
        tracing::info!(user_id = %account.user_id, email = %mask_email(email), "Account created");
        accounts.insert(key, account);
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        // Verify against a copy; the lock is released before hashing.
        let account = self
            .accounts
            .read()
            .await
            .get(&email.trim().to_lowercase())
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &account.password_hash)? {
            tracing::debug!(email = %mask_email(email), "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.session_for(&account)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let claims = match self.tokens.validate_token(token) {
            Ok(claims) => claims,
            // Already unusable; nothing to revoke.
            Err(AuthError::TokenExpired) => return Ok(()),
            Err(e) => return Err(e),
        };
        self.revoked.write().await.insert(claims.token_id);
        tracing::debug!(user_id = %claims.user_id, "Signed out");
        Ok(())
    }

    async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.tokens.validate_token(token)?;
        if self.revoked.read().await.contains(&claims.token_id) {
            return Err(AuthError::InvalidToken("Token has been revoked".to_string()));
        }
        Ok(claims)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let known = self
            .accounts
            .read()
            .await
            .contains_key(&email.trim().to_lowercase());
        tracing::info!(email = %mask_email(email), known, "Password reset requested");
        Ok(())
    }
}
