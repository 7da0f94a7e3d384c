//! Workflow state model.

use crate::{PublishFailure, StoryId, WorkflowPhase};
use serde::{Deserialize, Serialize};

const PROGRESS_IDLE: u8 = 0;
const PROGRESS_RENDERING: u8 = 50;
const PROGRESS_PUBLISHING: u8 = 80;
const PROGRESS_DONE: u8 = 100;

/// Snapshot of a publishing workflow.
///
/// States are immutable; each transition builds the successor from the
/// current snapshot. The constructors here encode the progress scale (story
/// generation owns 0-50, rendering lands at 50, publishing at 80, everything
/// terminal at 100), but which transitions are legal is decided by the state
/// machine, the only caller of these constructors.
///
/// # Examples
///
/// ```
/// use raconteur_core::{StoryId, WorkflowPhase, WorkflowState};
///
/// let idle = WorkflowState::idle(StoryId::new("story-1").unwrap());
/// let rendering = idle.rendering();
/// assert_eq!(*rendering.phase(), WorkflowPhase::Rendering);
/// assert_eq!(*rendering.progress(), 50);
/// assert!(!rendering.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct WorkflowState {
    /// Story this workflow publishes
    story: StoryId,
    /// Current phase
    phase: WorkflowPhase,
    /// Progress percent shown to the user (0-100)
    progress: u8,
    /// Whether the settings gate short-circuited the run
    skipped: bool,
    /// Classified failure, present only in the failed phase
    failure: Option<PublishFailure>,
}

impl WorkflowState {
    /// Initial state for a story.
    pub fn idle(story: StoryId) -> Self {
        Self {
            story,
            phase: WorkflowPhase::Idle,
            progress: PROGRESS_IDLE,
            skipped: false,
            failure: None,
        }
    }

    /// Successor state when rendering begins.
    pub fn rendering(&self) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::Rendering,
            progress: PROGRESS_RENDERING,
            skipped: false,
            failure: None,
        }
    }

    /// Successor state when the render succeeded and publishing begins.
    pub fn publishing(&self) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::Publishing,
            progress: PROGRESS_PUBLISHING,
            skipped: false,
            failure: None,
        }
    }

    /// Successor state when the post is live and the handle prompt opens.
    pub fn awaiting_handle(&self) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::AwaitingHandle,
            progress: PROGRESS_DONE,
            skipped: false,
            failure: None,
        }
    }

    /// Terminal success state.
    pub fn completed(&self) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::Completed,
            progress: PROGRESS_DONE,
            skipped: self.skipped,
            failure: None,
        }
    }

    /// Terminal state for a run the settings gate skipped before any
    /// network call.
    pub fn completed_skipped(&self) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::Completed,
            progress: PROGRESS_DONE,
            skipped: true,
            failure: None,
        }
    }

    /// Terminal failure state carrying the classified failure.
    pub fn failed(&self, failure: PublishFailure) -> Self {
        Self {
            story: self.story.clone(),
            phase: WorkflowPhase::Failed,
            progress: PROGRESS_DONE,
            skipped: false,
            failure: Some(failure),
        }
    }

    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}
