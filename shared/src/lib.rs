//! Shared configuration and ambient utilities for the stateless auth workspace
//!
//! This crate provides functionality used by the core token crate and by
//! whatever transport layer embeds it:
//! - Signing configuration (`JwtConfig`) and its loaders
//! - Logging configuration
//! - Configuration error types

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, JwtConfig, LogFormat, LoggingConfig};
pub use errors::{ConfigError, ConfigResult};
