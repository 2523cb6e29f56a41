//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, TokenError};
pub use auth_shared::errors::ConfigError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DomainResult<T> = Result<T, DomainError>;
