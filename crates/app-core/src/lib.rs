//! Core application logic for Bookshelf
//!
//! This crate contains the pure, I/O-free rules shared by the login flow.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod validation;

pub use validation::{is_valid_identifier, is_valid_secret, validate_credentials, ValidationError};
