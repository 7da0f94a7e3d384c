//! Terminal workflow report.

use crate::{CommentOutcome, HandleResolution, PublishResult, WorkflowPhase, WorkflowState};
use serde::{Deserialize, Serialize};

/// Everything a caller learns when a workflow reaches a terminal phase.
///
/// For a gate-skipped run every optional field is `None` and the state is
/// marked skipped. For a failed run the state carries the classified
/// failure. For a completed publish the report holds the sharing record and
/// how the handle prompt resolved.
///
/// # Examples
///
/// ```
/// use raconteur_core::{StoryId, WorkflowReport, WorkflowState};
///
/// let state = WorkflowState::idle(StoryId::new("story-1").unwrap()).completed_skipped();
/// let report = WorkflowReport {
///     state,
///     publish: None,
///     comment: None,
///     resolution: None,
/// };
/// assert!(report.state.skipped());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Terminal workflow state
    pub state: WorkflowState,
    /// Sharing record, present when the publish call succeeded
    pub publish: Option<PublishResult>,
    /// Outcome of the handle prompt, present when the prompt ran
    pub comment: Option<CommentOutcome>,
    /// Which path resolved the handle prompt, present when the prompt ran
    pub resolution: Option<HandleResolution>,
}

impl WorkflowReport {
    /// Terminal phase of the run.
    pub fn phase(&self) -> WorkflowPhase {
        *self.state.phase()
    }
}
