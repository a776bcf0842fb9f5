//! Bookshelf access client
//!
//! This crate talks to the bookshelf backend: it authenticates a user against
//! the login endpoint and fetches the catalog of books visible to the
//! resulting session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod catalog;
pub mod http;
pub mod session;

pub use auth::{AuthClient, Authenticator};
pub use catalog::{sort_catalog, CatalogClient, CatalogItem, CatalogSource};
pub use http::{ApiClient, ClientConfig};
pub use session::{Credentials, Session};

/// Result type for access operations
pub type Result<T> = std::result::Result<T, AccessError>;

/// Error types for access operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The request never produced an HTTP response (DNS, connect, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The login endpoint answered with a non-2xx status
    #[error("Authentication failed with status {status}")]
    Auth {
        /// HTTP status code
        status: u16,
    },

    /// The catalog endpoint answered with a non-2xx status
    #[error("Catalog request failed with status {status}")]
    Catalog {
        /// HTTP status code
        status: u16,
    },

    /// A 2xx response whose body could not be decoded
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl AccessError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            AccessError::Auth { status } | AccessError::Catalog { status } => Some(*status),
            AccessError::Transport(_) | AccessError::Protocol(_) => None,
        }
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::Protocol(err.to_string())
    }
}
