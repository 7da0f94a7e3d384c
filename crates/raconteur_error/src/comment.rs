//! Follow-up comment error types.

/// Follow-up comment error with source location.
///
/// Comment posting is best-effort. Callers log this error and continue; it
/// never fails a workflow that has already published.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Comment Error: {} at line {} in {}", message, line, file)]
pub struct CommentError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CommentError {
    /// Create a new CommentError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use raconteur_error::CommentError;
    ///
    /// let err = CommentError::new("comment endpoint returned 503");
    /// assert!(err.message.contains("503"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
