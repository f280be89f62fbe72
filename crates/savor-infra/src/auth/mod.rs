//! Authentication implementations.

mod identity;
mod jwt;

pub use identity::{Argon2PasswordService, LocalIdentityProvider, MIN_PASSWORD_LEN, mask_email};
pub use jwt::{JwtConfig, JwtTokenService};
