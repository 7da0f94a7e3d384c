//! Input validation error types.

/// Kinds of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A handle was submitted with no characters left after normalization
    #[display("Handle is empty")]
    EmptyHandle,
    /// A handle exceeded the platform's 30 character limit
    #[display("Handle is {} characters, platform limit is 30", _0)]
    HandleTooLong(usize),
    /// A handle contained characters outside letters, digits, '.' and '_'
    #[display("Handle {:?} contains invalid characters", _0)]
    InvalidHandle(String),
    /// A caption exceeded the platform's 2200 character limit
    #[display("Caption is {} characters, platform limit is 2200", _0)]
    CaptionTooLong(usize),
    /// A story id was empty or whitespace
    #[display("Story id is empty")]
    EmptyStoryId,
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use raconteur_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::HandleTooLong(42));
/// assert!(format!("{}", err).contains("42 characters"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
