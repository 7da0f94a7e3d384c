//! Identifier types for stories and workflow runs.

use raconteur_error::{RaconteurResult, ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a generated story.
///
/// Story ids are minted by the content API and treated as opaque here. They
/// key the preview cache and the one-workflow-per-story guard, so equality
/// and hashing matter more than their contents.
///
/// # Examples
///
/// ```
/// use raconteur_core::StoryId;
///
/// let id = StoryId::new("story-42").unwrap();
/// assert_eq!(id.as_str(), "story-42");
/// assert!(StoryId::new("   ").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub struct StoryId(String);

impl StoryId {
    /// Create a story id, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> RaconteurResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyStoryId).into());
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a single workflow run.
///
/// Minted when a workflow starts and carried through log spans so concurrent
/// runs for different stories can be told apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    /// Mint a fresh workflow id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}
