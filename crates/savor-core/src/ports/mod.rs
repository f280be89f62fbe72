//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod notifier;
mod recipes;
mod repository;
mod storage;

pub use auth::{
    AuthError, AuthSession, IdentityProvider, PasswordService, TokenClaims, TokenService,
};
pub use notifier::{NotifyError, TopicNotifier, validate_topic};
pub use recipes::RecipeCatalog;
pub use repository::{FavoritesRepository, ProfileRepository};
pub use storage::{ObjectStorage, StorageError};
