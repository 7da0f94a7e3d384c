//! Results produced by a publishing run.

use crate::Handle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a successfully published carousel.
///
/// Produced once per successful publish call and attached to the story's
/// metadata by the caller as its sharing record.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use raconteur_core::PublishResult;
///
/// let result = PublishResult {
///     post_id: "post-981".to_string(),
///     carousel_url: Some("https://social.example.com/p/post-981".to_string()),
///     slide_count: 5,
///     published_at: Utc::now(),
/// };
/// assert_eq!(result.slide_count, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResult {
    /// Platform id of the created post
    pub post_id: String,
    /// Public URL of the carousel, when the platform returns one
    pub carousel_url: Option<String>,
    /// Number of slides the platform accepted
    pub slide_count: usize,
    /// When the platform accepted the post
    pub published_at: DateTime<Utc>,
}

/// Outcome of the post-publish handle prompt.
///
/// `submitted` is true only when a handle was collected and the follow-up
/// comment was actually posted. Skip, timeout, and comment failure all
/// produce the not-submitted shape.
///
/// # Examples
///
/// ```
/// use raconteur_core::{CommentOutcome, Handle};
///
/// let posted = CommentOutcome::submitted(Handle::new("@jane").unwrap(), "c-1");
/// assert!(posted.submitted);
///
/// let skipped = CommentOutcome::not_submitted();
/// assert!(skipped.handle.is_none() && skipped.comment_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentOutcome {
    /// Whether a follow-up comment was posted
    pub submitted: bool,
    /// The handle that was posted, when one was
    pub handle: Option<Handle>,
    /// Platform id of the created comment, when one was
    pub comment_id: Option<String>,
}

impl CommentOutcome {
    /// Outcome for a successfully posted handle comment.
    pub fn submitted(handle: Handle, comment_id: impl Into<String>) -> Self {
        Self {
            submitted: true,
            handle: Some(handle),
            comment_id: Some(comment_id.into()),
        }
    }

    /// Outcome for a prompt that resolved without posting a comment.
    pub fn not_submitted() -> Self {
        Self::default()
    }
}

/// Which path resolved the handle prompt.
///
/// The comment outcome alone cannot distinguish a skip from a timeout or a
/// failed comment call; reports carry this alongside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum HandleResolution {
    /// The user submitted a handle and the comment was posted
    Submitted,
    /// The user explicitly skipped the prompt
    Skipped,
    /// The deadline passed with no user action
    Expired,
    /// A handle was submitted but the comment call failed
    CommentFailed,
}
