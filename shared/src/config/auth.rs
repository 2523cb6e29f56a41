//! Token signing configuration

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

/// Environment variable holding the HMAC signing secret
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";

/// Environment variable holding the token-type label (e.g. `"Bearer "`)
pub const ENV_JWT_TOKEN_HEAD: &str = "JWT_TOKEN_HEAD";

/// Environment variable holding the token lifetime in seconds
pub const ENV_JWT_EXPIRATION: &str = "JWT_EXPIRATION";

/// Longest accepted token lifetime in seconds (ten years)
pub const MAX_EXPIRATION_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT signing configuration
///
/// There is no built-in secret: the default value carries an empty secret
/// and fails [`JwtConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,

    /// Token-type label prefixed to tokens in transport headers
    #[serde(default = "default_token_head")]
    pub token_head: String,

    /// Token lifetime in seconds
    #[serde(default = "default_expiration")]
    pub expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_head: default_token_head(),
            expiration: default_expiration(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_expiration_seconds(mut self, seconds: i64) -> Self {
        self.expiration = seconds;
        self
    }

    /// Set the token-type label
    pub fn with_token_head(mut self, token_head: impl Into<String>) -> Self {
        self.token_head = token_head.into();
        self
    }

    /// Load from `JWT_SECRET`, `JWT_TOKEN_HEAD` and `JWT_EXPIRATION`
    ///
    /// `JWT_SECRET` is required. Missing `JWT_TOKEN_HEAD` and
    /// `JWT_EXPIRATION` fall back to the defaults; a present but unparsable
    /// `JWT_EXPIRATION` is an error rather than a silent fallback.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secret = lookup(ENV_JWT_SECRET).ok_or_else(|| ConfigError::MissingSecret {
            key: ENV_JWT_SECRET.to_string(),
        })?;
        let token_head = lookup(ENV_JWT_TOKEN_HEAD).unwrap_or(defaults.token_head);
        let expiration = match lookup(ENV_JWT_EXPIRATION) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_JWT_EXPIRATION.to_string(),
                value: raw,
            })?,
            None => defaults.expiration,
        };

        Ok(Self {
            secret,
            token_head,
            expiration,
        })
    }

    /// Reject configurations that cannot sign tokens
    pub fn validate(&self) -> ConfigResult<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.expiration <= 0 {
            return Err(ConfigError::NonPositiveExpiration {
                seconds: self.expiration,
            });
        }
        if self.expiration > MAX_EXPIRATION_SECONDS {
            return Err(ConfigError::ExpirationTooLarge {
                seconds: self.expiration,
                max: MAX_EXPIRATION_SECONDS,
            });
        }
        Ok(())
    }
}

fn default_token_head() -> String {
    String::from("Bearer ")
}

fn default_expiration() -> i64 {
    604800 // 7 days
}
