//! Preview rendering error types.

/// Kinds of preview rendering errors.
///
/// Transport failures during a render call are [`crate::HttpError`]; these
/// variants cover failures the render endpoint itself declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// The server could not build slides from the story content
    #[display("Story content could not be rendered: {}", _0)]
    MalformedStory(String),
    /// The render response carried no slides
    #[display("Render for story {} returned no slides", _0)]
    NoSlides(String),
    /// The render response omitted the preview payload
    #[display("Render for story {} returned an empty response", _0)]
    MissingPayload(String),
}

/// Rendering error with location tracking.
///
/// # Examples
///
/// ```
/// use raconteur_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::MalformedStory(
///     "story body is empty".to_string(),
/// ));
/// assert!(format!("{}", err).contains("could not be rendered"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new rendering error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
