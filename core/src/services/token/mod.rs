//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Credential authentication through a `CredentialAuthenticator`
//! - HS256 token generation
//! - Token decoding, signature verification and claim extraction
//! - Expiration and subject-match validation

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use config::TokenServiceConfig;
pub use service::TokenService;
