//! Bookshelf
//!
//! Login and catalog access for the bookshelf demo backend. The host UI owns
//! rendering; this crate re-exports the pieces it drives.

#![warn(missing_docs)]

pub use access_client::{
    AccessError, ApiClient, AuthClient, CatalogClient, CatalogItem, ClientConfig, Credentials,
    Session,
};
pub use app_core::validation::{is_valid_identifier, is_valid_secret, ValidationError};
pub use app_state::{ControllerError, LoginForm, LoginState, SessionController, SessionEvent};
