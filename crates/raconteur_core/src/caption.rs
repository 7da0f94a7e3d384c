//! Carousel caption validation.

use raconteur_error::{RaconteurResult, ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// Maximum number of characters the platform accepts in a caption.
pub const MAX_CAPTION_CHARS: usize = 2200;

/// The shared caption text of a carousel.
///
/// Construction trims surrounding whitespace and enforces the platform's
/// 2200 character ceiling. An empty caption is allowed; the platform treats
/// it as a post without text.
///
/// # Examples
///
/// ```
/// use raconteur_core::{Caption, MAX_CAPTION_CHARS};
///
/// let caption = Caption::new("  A winter tale in five panels.  ").unwrap();
/// assert_eq!(caption.as_str(), "A winter tale in five panels.");
///
/// let over = "x".repeat(MAX_CAPTION_CHARS + 1);
/// assert!(Caption::new(over).is_err());
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub struct Caption(String);

impl Caption {
    /// Trim and validate caption text.
    pub fn new(text: impl AsRef<str>) -> RaconteurResult<Self> {
        let trimmed = text.as_ref().trim();
        let length = trimmed.chars().count();
        if length > MAX_CAPTION_CHARS {
            return Err(ValidationError::new(ValidationErrorKind::CaptionTooLong(length)).into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The caption text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the caption.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the caption is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let caption = Caption::new("\n  hello  \t").unwrap();
        assert_eq!(caption.as_str(), "hello");
    }

    #[test]
    fn allows_empty_captions() {
        let caption = Caption::new("").unwrap();
        assert!(caption.is_empty());
    }

    #[test]
    fn ceiling_counts_characters_not_bytes() {
        // Multibyte characters count once each.
        let text = "é".repeat(MAX_CAPTION_CHARS);
        assert!(Caption::new(&text).is_ok());
        let over = "é".repeat(MAX_CAPTION_CHARS + 1);
        assert!(Caption::new(&over).is_err());
    }

    #[test]
    fn ceiling_applies_after_trim() {
        let padded = format!("  {}  ", "x".repeat(MAX_CAPTION_CHARS));
        assert!(Caption::new(&padded).is_ok());
    }
}
