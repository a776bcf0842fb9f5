//! Application state management for Bookshelf
//!
//! This crate holds the login form state and the session controller that
//! drives validation, authentication and the catalog fetch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod form;

pub use controller::{ControllerError, LoginState, SessionController, SessionEvent};
pub use form::LoginForm;
