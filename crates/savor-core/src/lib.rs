//! # Savor Core
//!
//! The domain layer of the Savor recipe backend.
//! Recipe and profile types, the search query builder and local filter,
//! the favorites service, and the ports infrastructure must implement.
//! No I/O happens here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{RemoteFetchError, StoreError};
