//! Value objects representing immutable domain concepts.

pub mod auth_context;
pub mod issued_token;

// Re-export commonly used types
pub use auth_context::AuthContext;
pub use issued_token::IssuedToken;
