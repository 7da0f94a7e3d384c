//! Top-level error wrapper types.

use crate::{
    CommentError, ConfigError, HttpError, JsonError, PublishError, RenderError, SettingsError,
    ValidationError, WorkflowError,
};

/// This is the foundation error enum. Every fallible operation in the
/// raconteur crates resolves to one of these variants.
///
/// # Examples
///
/// ```
/// use raconteur_error::{HttpError, RaconteurError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: RaconteurError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RaconteurErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Preview rendering error
    #[from(RenderError)]
    Render(RenderError),
    /// Publishing error
    #[from(PublishError)]
    Publish(PublishError),
    /// Follow-up comment error
    #[from(CommentError)]
    Comment(CommentError),
    /// Settings gate error
    #[from(SettingsError)]
    Settings(SettingsError),
    /// Input validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Workflow orchestration error
    #[from(WorkflowError)]
    Workflow(WorkflowError),
}

/// Raconteur error with kind discrimination.
///
/// # Examples
///
/// ```
/// use raconteur_error::{ConfigError, RaconteurResult};
///
/// fn might_fail() -> RaconteurResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Raconteur Error: {}", _0)]
pub struct RaconteurError(Box<RaconteurErrorKind>);

impl RaconteurError {
    /// Create a new error from a kind.
    pub fn new(kind: RaconteurErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RaconteurErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RaconteurErrorKind
impl<T> From<T> for RaconteurError
where
    T: Into<RaconteurErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for raconteur operations.
///
/// # Examples
///
/// ```
/// use raconteur_error::{HttpError, RaconteurResult};
///
/// fn fetch_data() -> RaconteurResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type RaconteurResult<T> = std::result::Result<T, RaconteurError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PublishErrorKind, WorkflowErrorKind};

    #[test]
    fn kind_is_preserved_through_conversion() {
        let err: RaconteurError = PublishError::new(PublishErrorKind::Unauthorized(
            "token expired".to_string(),
        ))
        .into();
        match err.kind() {
            RaconteurErrorKind::Publish(publish) => {
                assert!(matches!(publish.kind, PublishErrorKind::Unauthorized(_)));
            }
            other => panic!("expected publish kind, got {other}"),
        }
    }

    #[test]
    fn display_includes_source_location() {
        let err: RaconteurError =
            WorkflowError::new(WorkflowErrorKind::PromptClosed).into();
        let rendered = format!("{err}");
        assert!(rendered.contains("Workflow Error"));
        assert!(rendered.contains("error.rs"));
    }
}
