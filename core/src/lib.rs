//! # Auth Core
//!
//! Token lifecycle for stateless authentication. This crate authenticates a
//! principal through a pluggable credential authenticator, mints compact
//! HS256-signed tokens for it, and later decides whether a presented token is
//! intact, unexpired and issued to the expected principal.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::{
    Clock, CredentialAuthenticator, SystemClock, TokenService, TokenServiceConfig,
};
