//! Trait definitions for the workflow's external collaborators.

use async_trait::async_trait;
use raconteur_core::{CommentOutcome, Handle, PreviewResult, PublishResult, StoryId};
use raconteur_error::RaconteurResult;

/// The three remote publishing operations.
///
/// Each call is a single idempotency-unaware network request. No
/// implementation may retry internally; a retry, if any, is an explicit
/// caller re-trigger of the whole workflow.
#[async_trait]
pub trait PublishApi: Send + Sync {
    /// Render the story into carousel slides and cache the result
    /// server-side.
    ///
    /// Fails with a render error when the story content cannot be turned
    /// into slides, and a transport error otherwise.
    async fn render_preview(&self, story: &StoryId) -> RaconteurResult<PreviewResult>;

    /// Publish the story's server-cached render as a carousel post.
    ///
    /// The endpoint reuses the render produced by
    /// [`render_preview`](Self::render_preview); callers must not invoke
    /// this before a render for the same story has succeeded.
    async fn publish(&self, story: &StoryId) -> RaconteurResult<PublishResult>;

    /// Post a follow-up comment crediting a handle under a published post.
    async fn post_handle_comment(
        &self,
        post_id: &str,
        handle: &Handle,
    ) -> RaconteurResult<CommentOutcome>;
}

/// Read-once gate deciding whether publishing runs at all.
///
/// Checked exactly once per workflow invocation, never re-checked mid-flow.
/// Implementations resolve read failures to a boolean themselves (fail-open
/// or fail-closed is their policy), so the workflow only ever sees a yes
/// or a no.
#[async_trait]
pub trait PublishingGate: Send + Sync {
    /// Whether publishing is currently enabled.
    async fn publishing_enabled(&self) -> bool;
}
