//! Issued token value object for login responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly signed token together with its metadata
///
/// This is what a login endpoint hands back to the client:
/// - the compact JWT itself
/// - the token-type label clients prefix it with in headers
/// - the issuance and expiration instants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedToken {
    /// Compact three-segment JWT
    pub token: String,

    /// Token-type label (e.g. `"Bearer "`)
    pub token_type: String,

    /// Issuance instant
    pub issued_at: DateTime<Utc>,

    /// Expiration instant
    pub expires_at: DateTime<Utc>,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl IssuedToken {
    /// Value for an `Authorization` header: the label followed by the token
    pub fn authorization_value(&self) -> String {
        format!("{}{}", self.token_type, self.token)
    }
}
