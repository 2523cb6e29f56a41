//! Request-scoped authenticated identity.

use chrono::{DateTime, Utc};

use crate::domain::entities::Principal;

/// The authenticated identity of one request or call chain
///
/// Returned by `TokenService::authenticate` and handed down explicitly to
/// whatever runs next (authorization checks, handlers). Each request owns
/// its own context, so concurrent requests never see each other's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    principal: Principal,
    authenticated_at: DateTime<Utc>,
}

impl AuthContext {
    pub fn new(principal: Principal, authenticated_at: DateTime<Utc>) -> Self {
        Self {
            principal,
            authenticated_at,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn username(&self) -> &str {
        &self.principal.username
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }

    /// Consumes the context, yielding the principal
    pub fn into_principal(self) -> Principal {
        self.principal
    }
}
