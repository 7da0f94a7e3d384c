//! Publishing error types.

/// Kinds of publishing errors.
///
/// Publish failures keep the shape the server declared them in. The server's
/// error code decides the variant; the HTTP status is consulted only when no
/// code is present. Message text is carried for display, never matched on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// The platform refused the post because the account is over quota
    #[display("Rate limited by the platform: {}", message)]
    RateLimited {
        /// Error message from the server
        message: String,
        /// Seconds to wait before the platform will accept another post
        retry_after_secs: Option<u64>,
    },
    /// The platform rejected the account's credentials
    #[display("Platform authentication failed: {}", _0)]
    Unauthorized(String),
    /// The server declared a failure code this client has no mapping for
    #[display("Publish rejected with code {}: {}", code, message)]
    Rejected {
        /// Server-declared error code
        code: String,
        /// Error message from the server
        message: String,
    },
    /// The server answered with a failing status and no error envelope
    #[display("Publish failed with HTTP {}: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or status text
        message: String,
    },
}

/// Publishing error with location tracking.
///
/// # Examples
///
/// ```
/// use raconteur_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::RateLimited {
///     message: "daily posting quota reached".to_string(),
///     retry_after_secs: Some(3600),
/// });
/// assert!(format!("{}", err).contains("Rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publishing error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
