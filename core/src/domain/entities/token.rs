//! Token claims for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claim carrying the principal's username
pub const CLAIM_SUBJECT: &str = "sub";

/// Registered claim carrying the issuance instant
pub const CLAIM_ISSUED_AT: &str = "iat";

/// Registered claim carrying the expiration instant
pub const CLAIM_EXPIRATION: &str = "exp";

/// Claims structure for JWT payload
///
/// Timestamps are NumericDate values (whole seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Additional claims; reserved and empty at issuance
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Creates claims for `subject` issued at `issued_at`, valid for
    /// `validity_seconds`
    ///
    /// # Arguments
    ///
    /// * `subject` - The principal's username
    /// * `issued_at` - Issuance instant; sub-second precision is dropped
    /// * `validity_seconds` - Lifetime added to the issuance instant
    ///
    /// Returns `None` when the expiration instant falls outside the
    /// representable date range.
    pub fn new(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity_seconds: i64,
    ) -> Option<Self> {
        let validity = Duration::try_seconds(validity_seconds)?;
        let expires_at = issued_at.checked_add_signed(validity)?;

        Some(Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            extra: Map::new(),
        })
    }

    /// Issuance instant, if representable
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiration instant, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks if the claims have expired at `now`
    ///
    /// A token is live only while `now` is strictly before its expiration.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Seconds between issuance and expiration
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}
