//! Failure classification for publishing runs.

use raconteur_error::{PublishErrorKind, RaconteurError, RaconteurErrorKind};
use serde::{Deserialize, Serialize};

/// User-facing classification of a workflow failure.
///
/// Callers branch on this, never on message text: rate limiting gets
/// "try again later" treatment, auth problems get escalated, everything
/// else is shown verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The story content could not be rendered into slides
    Render,
    /// The platform is over quota; recoverable by waiting or sharing manually
    RateLimited,
    /// The platform rejected the account's credentials
    Auth,
    /// Any other failure
    Generic,
}

/// A classified workflow failure, recorded in terminal state.
///
/// # Examples
///
/// ```
/// use raconteur_core::{FailureClass, PublishFailure};
/// use raconteur_error::HttpError;
///
/// let failure = PublishFailure::from_error(&HttpError::new("connection reset").into());
/// assert_eq!(failure.class, FailureClass::Generic);
/// assert!(failure.message.contains("connection reset"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishFailure {
    /// Classification the caller branches on
    pub class: FailureClass,
    /// What went wrong, as declared by the failing layer
    pub message: String,
    /// Seconds until the platform will accept another post, when rate limited
    pub retry_after_secs: Option<u64>,
}

impl PublishFailure {
    /// Classify an error into a recorded failure.
    ///
    /// The error's own kind decides the class; message text is carried for
    /// display but never inspected.
    pub fn from_error(err: &RaconteurError) -> Self {
        match err.kind() {
            RaconteurErrorKind::Render(render) => Self {
                class: FailureClass::Render,
                message: render.kind.to_string(),
                retry_after_secs: None,
            },
            RaconteurErrorKind::Publish(publish) => match &publish.kind {
                PublishErrorKind::RateLimited {
                    message,
                    retry_after_secs,
                } => Self {
                    class: FailureClass::RateLimited,
                    message: message.clone(),
                    retry_after_secs: *retry_after_secs,
                },
                PublishErrorKind::Unauthorized(message) => Self {
                    class: FailureClass::Auth,
                    message: message.clone(),
                    retry_after_secs: None,
                },
                other => Self {
                    class: FailureClass::Generic,
                    message: other.to_string(),
                    retry_after_secs: None,
                },
            },
            other => Self {
                class: FailureClass::Generic,
                message: other.to_string(),
                retry_after_secs: None,
            },
        }
    }
}
