//! Configuration module
//!
//! - `auth` - Signing secret, token-type label and token lifetime
//! - `logging` - Logging configuration and subscriber setup

pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigResult;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use logging::{init_tracing, LogFormat, LoggingConfig};

/// Complete configuration for a token-issuing deployment
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AuthConfig {
    /// Build configuration from environment variables
    ///
    /// Only the signing values are read from the environment; the caller
    /// picks the logging setup, e.g. [`LoggingConfig::production`].
    pub fn from_env(logging: LoggingConfig) -> ConfigResult<Self> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            logging,
        })
    }

    /// Validate all sub-configurations
    pub fn validate(&self) -> ConfigResult<()> {
        self.jwt.validate()
    }
}
