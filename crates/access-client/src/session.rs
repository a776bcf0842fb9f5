//! Credentials and session values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login credentials for one attempt
///
/// Serializes to the login endpoint's body shape,
/// `{"UserName": ..., "Password": ...}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account identifier
    #[serde(rename = "UserName")]
    pub identifier: String,
    /// Password
    #[serde(rename = "Password")]
    pub secret: String,
}

impl Credentials {
    /// Create credentials from raw input
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Authenticated session returned by a successful login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated requests
    pub token: String,
}

impl Session {
    /// Create a session from a token
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// The bearer token
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}
