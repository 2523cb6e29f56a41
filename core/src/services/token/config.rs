//! Configuration for the token service

use std::fmt;

use auth_shared::config::JwtConfig;
use auth_shared::errors::{ConfigError, ConfigResult};

/// Validated configuration for the token service
///
/// Can only be built through constructors that reject an empty secret or a
/// lifetime outside `1..=MAX_EXPIRATION_SECONDS`, so a running service never
/// meets either.
#[derive(Clone)]
pub struct TokenServiceConfig {
    secret: String,
    token_head: String,
    validity_seconds: i64,
}

impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"<redacted>")
            .field("token_head", &self.token_head)
            .field("validity_seconds", &self.validity_seconds)
            .finish()
    }
}

impl TokenServiceConfig {
    /// Creates a configuration with the default `"Bearer "` label
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC signing secret, must not be empty
    /// * `validity_seconds` - Token lifetime, positive and at most
    ///   [`MAX_EXPIRATION_SECONDS`](auth_shared::config::auth::MAX_EXPIRATION_SECONDS)
    pub fn new(secret: impl Into<String>, validity_seconds: i64) -> ConfigResult<Self> {
        Self::from_jwt_config(&JwtConfig::new(secret).with_expiration_seconds(validity_seconds))
    }

    /// Builds and validates a configuration from the shared JWT settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> ConfigResult<Self> {
        jwt.validate()?;

        Ok(Self {
            secret: jwt.secret.clone(),
            token_head: jwt.token_head.clone(),
            validity_seconds: jwt.expiration,
        })
    }

    /// Replaces the token-type label
    pub fn with_token_head(mut self, token_head: impl Into<String>) -> Self {
        self.token_head = token_head.into();
        self
    }

    pub fn token_head(&self) -> &str {
        &self.token_head
    }

    pub fn validity_seconds(&self) -> i64 {
        self.validity_seconds
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Prefixes `token` with the token-type label for a transport header
    pub fn authorization_value(&self, token: &str) -> String {
        format!("{}{}", self.token_head, token)
    }

    /// Strips the token-type label from a transport header value
    ///
    /// Returns `None` when the label is missing or nothing follows it.
    pub fn strip_token_type<'a>(&self, header_value: &'a str) -> Option<&'a str> {
        header_value
            .strip_prefix(self.token_head.as_str())
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    fn try_from(jwt: &JwtConfig) -> Result<Self, Self::Error> {
        Self::from_jwt_config(jwt)
    }
}
