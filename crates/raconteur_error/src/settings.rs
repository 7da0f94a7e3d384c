//! Settings gate error types.

/// Settings read error with source location.
///
/// Raised when the settings document cannot be fetched or decoded. Whether
/// this blocks the workflow depends on the gate's fail-open setting.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Settings Error: {} at line {} in {}", message, line, file)]
pub struct SettingsError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SettingsError {
    /// Create a new SettingsError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use raconteur_error::SettingsError;
    ///
    /// let err = SettingsError::new("settings document missing auto_publish");
    /// assert!(err.message.contains("auto_publish"));
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
