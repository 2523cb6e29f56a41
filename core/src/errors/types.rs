//! Error types for authentication and token handling
//!
//! Expired tokens and tokens issued to a different principal are not errors;
//! token validation reports those as `Ok(false)`. Everything here is a
//! failure the caller has to surface.

use thiserror::Error;

/// Authentication-related errors
///
/// Raised by a credential authenticator and propagated unchanged to the
/// caller, which turns them into an unauthorized response. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Credential provider unavailable: {message}")]
    ProviderUnavailable { message: String },
}

/// Token-related errors
///
/// All variants except `TokenGenerationFailed` are decode failures: the
/// token is tampered, signed with another key, or structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether this error came from decoding a presented token
    pub fn is_decode_failure(&self) -> bool {
        !matches!(self, TokenError::TokenGenerationFailed)
    }
}
