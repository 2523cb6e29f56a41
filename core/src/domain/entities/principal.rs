//! Principal entity: an authenticated identity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An identity established by a credential authenticator
///
/// Only `username` takes part in token issuance and validation. Attributes
/// are whatever the authenticator chooses to attach and are never read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique username; becomes the token subject
    pub username: String,

    /// Opaque authenticator-supplied attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Value>,
}

impl Principal {
    /// Creates a principal with no attributes
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            attributes: HashMap::new(),
        }
    }

    /// Attaches an opaque attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether `subject` names this principal
    pub fn matches_subject(&self, subject: &str) -> bool {
        self.username == subject
    }
}
