//! Entry points that trigger publishing.
//!
//! Both triggers are thin shells over [`PublishOrchestrator::start`]; the
//! only difference is when the user gets to see the carousel. Auto posts
//! right after generation, manual renders a preview first and shares on
//! request.

use crate::orchestrator::{PublishOrchestrator, WorkflowHandle};
use raconteur_core::{PreviewResult, StoryId};
use raconteur_error::{RaconteurResult, WorkflowError, WorkflowErrorKind};
use tracing::{info, instrument};

/// Hands-off trigger: publish a story as soon as it is generated.
#[derive(Clone)]
pub struct AutoPublisher {
    orchestrator: PublishOrchestrator,
}

impl AutoPublisher {
    /// Wrap an orchestrator for automatic publishing.
    pub fn new(orchestrator: PublishOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Kick off publishing for a freshly generated story.
    #[instrument(skip(self), fields(story = %story))]
    pub fn publish_generated(&self, story: StoryId) -> RaconteurResult<WorkflowHandle> {
        info!("Auto-publishing generated story");
        self.orchestrator.start(story)
    }
}

/// Review-first trigger: render a preview, let the user browse it, then
/// share on request.
#[derive(Clone)]
pub struct ManualPublisher {
    orchestrator: PublishOrchestrator,
}

impl ManualPublisher {
    /// Wrap an orchestrator for preview-then-share publishing.
    pub fn new(orchestrator: PublishOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Render the story's carousel and cache it for browsing.
    pub async fn preview(&self, story: &StoryId) -> RaconteurResult<PreviewResult> {
        self.orchestrator.render_preview(story).await
    }

    /// The cached preview, when one is held.
    pub fn cached(&self, story: &StoryId) -> Option<PreviewResult> {
        self.orchestrator.cached_preview(story)
    }

    /// Drop the cached preview, typically because the story was
    /// regenerated.
    pub fn discard(&self, story: &StoryId) -> bool {
        self.orchestrator.invalidate_preview(story)
    }

    /// Publish a story the user has previewed.
    ///
    /// Requires the story to have been rendered for browsing so "share"
    /// always refers to a carousel the user actually saw; an undiscarded
    /// preview counts even when local caching is switched off. The workflow
    /// renders again through the same endpoint, which reuses the server-side
    /// render, so sharing stays fast.
    #[instrument(skip(self), fields(story = %story))]
    pub fn share(&self, story: &StoryId) -> RaconteurResult<WorkflowHandle> {
        if !self.orchestrator.was_previewed(story) {
            return Err(
                WorkflowError::new(WorkflowErrorKind::NothingToShare(story.to_string())).into(),
            );
        }
        self.orchestrator.start(story.clone())
    }
}
