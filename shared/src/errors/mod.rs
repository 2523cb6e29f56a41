//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// These are startup failures: a service must refuse to start rather than
/// sign tokens with an unusable configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {key}")]
    MissingSecret { key: String },

    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("JWT expiration must be a positive number of seconds, got {seconds}")]
    NonPositiveExpiration { seconds: i64 },

    #[error("JWT expiration of {seconds}s exceeds the maximum of {max}s")]
    ExpirationTooLarge { seconds: i64, max: i64 },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::EmptySecret.to_string(), "JWT secret must not be empty");

        let error = ConfigError::NonPositiveExpiration { seconds: -5 };
        assert!(error.to_string().contains("-5"));

        let error = ConfigError::MissingSecret {
            key: "JWT_SECRET".to_string(),
        };
        assert_eq!(error.to_string(), "Missing required setting JWT_SECRET");

        let error = ConfigError::ExpirationTooLarge {
            seconds: i64::MAX,
            max: 315_360_000,
        };
        assert!(error.to_string().contains("315360000"));

        let error = ConfigError::InvalidValue {
            key: "JWT_EXPIRATION".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for JWT_EXPIRATION: soon");
    }
}
