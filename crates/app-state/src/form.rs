//! Login form state
//!
//! Tracks the raw text of the two input fields with their inline validation
//! messages. Messages are recomputed on every edit; submission is allowed as
//! soon as both fields are non-empty, validity is checked on submit.

use access_client::Credentials;
use app_core::validation::{is_valid_identifier, is_valid_secret, ValidationError};
use std::fmt;

/// Input state of the login form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    identifier: String,
    secret: String,
    identifier_error: Option<ValidationError>,
    secret_error: Option<ValidationError>,
    secret_visible: bool,
}

impl LoginForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the identifier text
    pub fn set_identifier(&mut self, value: impl Into<String>) {
        self.identifier = value.into();
        self.identifier_error =
            (!is_valid_identifier(&self.identifier)).then_some(ValidationError::InvalidIdentifier);
    }

    /// Replace the secret text
    pub fn set_secret(&mut self, value: impl Into<String>) {
        self.secret = value.into();
        self.secret_error =
            (!is_valid_secret(&self.secret)).then_some(ValidationError::InvalidSecret);
    }

    /// Current identifier text
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Current secret text
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Inline message for the identifier field, if it is invalid
    pub fn identifier_message(&self) -> Option<String> {
        self.identifier_error.map(|e| e.to_string())
    }

    /// Inline message for the secret field, if it is invalid
    pub fn secret_message(&self) -> Option<String> {
        self.secret_error.map(|e| e.to_string())
    }

    /// Whether the login action is enabled
    pub fn can_submit(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.is_empty()
    }

    /// Flip between showing and masking the secret
    pub fn toggle_secret_visibility(&mut self) {
        self.secret_visible = !self.secret_visible;
    }

    /// Whether the secret is shown in clear text
    pub fn secret_visible(&self) -> bool {
        self.secret_visible
    }

    /// Snapshot the current input as credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.identifier.clone(), self.secret.clone())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("identifier", &self.identifier)
            .field("identifier_error", &self.identifier_error)
            .field("secret_error", &self.secret_error)
            .field("secret_visible", &self.secret_visible)
            .finish_non_exhaustive()
    }
}
