//! Projection of workflow state into user-facing progress views.

use raconteur_core::{FailureClass, PublishFailure, WorkflowPhase, WorkflowState};
use raconteur_interface::ProgressView;

/// Builds display projections from workflow state snapshots.
///
/// The projection is pure: the same state always yields the same view, and
/// producing a view never advances the workflow. A UI that missed earlier
/// updates can rebuild its display from the latest view alone.
pub struct ProgressReporter;

impl ProgressReporter {
    /// Project a state snapshot into its display form.
    pub fn project(state: &WorkflowState) -> ProgressView {
        let (step_index, step_label) = match state.phase() {
            WorkflowPhase::Idle => (0, "queued"),
            WorkflowPhase::Rendering => (1, "render"),
            WorkflowPhase::Publishing => (2, "publish"),
            WorkflowPhase::AwaitingHandle => (3, "handle"),
            WorkflowPhase::Completed => (4, "done"),
            WorkflowPhase::Failed => (4, "failed"),
        };
        ProgressView {
            step_index,
            step_label,
            percent: *state.progress(),
            message: Self::message(state),
        }
    }

    fn message(state: &WorkflowState) -> String {
        match state.phase() {
            WorkflowPhase::Idle => "waiting to start".to_string(),
            WorkflowPhase::Rendering => "creating carousel images".to_string(),
            WorkflowPhase::Publishing => "posting to the social platform".to_string(),
            WorkflowPhase::AwaitingHandle => "posted successfully".to_string(),
            WorkflowPhase::Completed if *state.skipped() => {
                "publishing is disabled, story was not posted".to_string()
            }
            WorkflowPhase::Completed => "posted successfully".to_string(),
            WorkflowPhase::Failed => Self::failure_message(state.failure().as_ref()),
        }
    }

    /// Failure text branches on the failure class, never on message content.
    fn failure_message(failure: Option<&PublishFailure>) -> String {
        let Some(failure) = failure else {
            return "publishing failed".to_string();
        };
        match failure.class {
            FailureClass::RateLimited => match failure.retry_after_secs {
                Some(secs) => format!(
                    "The platform is rate limiting new posts. \
                     Try again in {secs} seconds or share the carousel manually."
                ),
                None => "The platform is rate limiting new posts. \
                         Try again later or share the carousel manually."
                    .to_string(),
            },
            FailureClass::Auth => format!(
                "Publishing authorization failed: {}. \
                 Contact the operator to reconnect the account.",
                failure.message
            ),
            FailureClass::Render | FailureClass::Generic => failure.message.clone(),
        }
    }
}
