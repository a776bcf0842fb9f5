//! Login input validation
//!
//! Syntactic checks run before any network call. An identifier is two ASCII
//! uppercase letters followed by four ASCII digits. A secret is searched for
//! a position from which an uppercase letter, a lowercase letter, a digit and
//! a symbol all appear later on the same line, and from which eight
//! characters follow without a line break. Nothing past the eighth character
//! is constrained, so longer secrets pass as long as the mix is present.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Which credential field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier is not two uppercase letters and four digits
    #[error("Invalid UserID")]
    InvalidIdentifier,

    /// Secret lacks a required character class or is too short
    #[error("Invalid Password")]
    InvalidSecret,
}

/// Check an account identifier, e.g. `AB1234`
pub fn is_valid_identifier(identifier: &str) -> bool {
    static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IDENTIFIER_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{2}[0-9]{4}$").unwrap());

    re.is_match(identifier)
}

/// Check a secret's composition and minimum length
pub fn is_valid_secret(secret: &str) -> bool {
    static SECRET_REGEX: OnceLock<fancy_regex::Regex> = OnceLock::new();
    let re = SECRET_REGEX.get_or_init(|| {
        fancy_regex::Regex::new(r"(?=.*[A-Z])(?=.*[0-9])(?=.*[a-z])(?=.*[^A-Za-z0-9]).{8}")
            .unwrap()
    });

    // A search that hits the backtrack limit counts as a rejection
    re.is_match(secret).unwrap_or(false)
}

/// Validate both fields, identifier first
pub fn validate_credentials(identifier: &str, secret: &str) -> Result<(), ValidationError> {
    if !is_valid_identifier(identifier) {
        return Err(ValidationError::InvalidIdentifier);
    }
    if !is_valid_secret(secret) {
        return Err(ValidationError::InvalidSecret);
    }
    Ok(())
}
