//! Social handle validation and normalization.

use raconteur_error::{RaconteurResult, ValidationError, ValidationErrorKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Maximum number of characters in a platform handle.
pub const MAX_HANDLE_CHARS: usize = 30;

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._]+$").expect("Valid handle regex"));

/// A normalized social-platform username.
///
/// Construction trims whitespace, strips a single leading `@`, and enforces
/// the platform's character rules. The stored form never carries the `@`, so
/// it can be sent to the comment endpoint as-is.
///
/// # Examples
///
/// ```
/// use raconteur_core::Handle;
///
/// let handle = Handle::new("@jane_doe").unwrap();
/// assert_eq!(handle.as_str(), "jane_doe");
///
/// assert!(Handle::new("@").is_err());
/// assert!(Handle::new("jane doe").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub struct Handle(String);

impl Handle {
    /// Normalize and validate raw user input into a handle.
    pub fn new(raw: impl AsRef<str>) -> RaconteurResult<Self> {
        let trimmed = raw.as_ref().trim();
        let bare = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyHandle).into());
        }
        let length = bare.chars().count();
        if length > MAX_HANDLE_CHARS {
            return Err(ValidationError::new(ValidationErrorKind::HandleTooLong(length)).into());
        }
        if !HANDLE_PATTERN.is_match(bare) {
            return Err(
                ValidationError::new(ValidationErrorKind::InvalidHandle(bare.to_string())).into(),
            );
        }
        Ok(Self(bare.to_string()))
    }

    /// The normalized handle without a leading `@`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_at_sign() {
        let handle = Handle::new("@jane.doe").unwrap();
        assert_eq!(handle.as_str(), "jane.doe");
    }

    #[test]
    fn keeps_bare_handles_unchanged() {
        let handle = Handle::new("jane_doe").unwrap();
        assert_eq!(handle.as_str(), "jane_doe");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let handle = Handle::new("  @jane_doe  ").unwrap();
        assert_eq!(handle.as_str(), "jane_doe");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(Handle::new("").is_err());
        assert!(Handle::new("@").is_err());
        assert!(Handle::new("   ").is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(Handle::new("jane doe").is_err());
        assert!(Handle::new("jane-doe").is_err());
        assert!(Handle::new("jane@doe").is_err());
    }

    #[test]
    fn rejects_over_long_handles() {
        let long = "a".repeat(MAX_HANDLE_CHARS + 1);
        assert!(Handle::new(&long).is_err());
        let max = "a".repeat(MAX_HANDLE_CHARS);
        assert!(Handle::new(&max).is_ok());
    }

    #[test]
    fn only_one_at_sign_is_stripped() {
        assert!(Handle::new("@@jane").is_err());
    }
}
