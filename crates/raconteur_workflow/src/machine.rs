//! Pure transition function for the publishing workflow.

use raconteur_core::{PublishFailure, WorkflowPhase, WorkflowState};
use tracing::warn;

/// Something that happened to a running workflow.
///
/// Events are produced by the driver after executing a command; the
/// transition function never performs the work itself.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// The settings gate reported whether publishing is enabled
    GateChecked {
        /// Gate verdict
        enabled: bool,
    },
    /// The render call produced a preview, now held in the cache
    RenderSucceeded,
    /// The render call failed
    RenderFailed(PublishFailure),
    /// The publish call created a post
    PublishSucceeded {
        /// Platform id of the created post
        post_id: String,
    },
    /// The publish call failed
    PublishFailed(PublishFailure),
    /// The handle prompt resolved, by submission, skip, or deadline
    HandleResolved,
}

/// Side effect the driver performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Ask the settings gate whether publishing is enabled
    CheckGate,
    /// Render the story into carousel slides
    Render,
    /// Publish the rendered carousel
    Publish,
    /// Open the handle prompt for the created post
    CollectHandle {
        /// Post the follow-up comment attaches to
        post_id: String,
    },
}

/// Result of applying an event to a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Successor state
    pub state: WorkflowState,
    /// Next side effect, `None` once the workflow is settled
    pub command: Option<WorkflowCommand>,
}

/// Apply an event to a state, producing the successor state and the next
/// command.
///
/// The phase and event pairing decides everything; no hidden state is
/// consulted. An event that does not apply to the current phase leaves the
/// state unchanged and issues no command, so a stray or duplicate event can
/// never un-fail or re-run a workflow.
pub fn step(state: &WorkflowState, event: WorkflowEvent) -> Transition {
    match (*state.phase(), event) {
        (WorkflowPhase::Idle, WorkflowEvent::GateChecked { enabled: true }) => Transition {
            state: state.rendering(),
            command: Some(WorkflowCommand::Render),
        },
        (WorkflowPhase::Idle, WorkflowEvent::GateChecked { enabled: false }) => Transition {
            state: state.completed_skipped(),
            command: None,
        },
        (WorkflowPhase::Rendering, WorkflowEvent::RenderSucceeded) => Transition {
            state: state.publishing(),
            command: Some(WorkflowCommand::Publish),
        },
        (WorkflowPhase::Rendering, WorkflowEvent::RenderFailed(failure)) => Transition {
            state: state.failed(failure),
            command: None,
        },
        (WorkflowPhase::Publishing, WorkflowEvent::PublishSucceeded { post_id }) => Transition {
            state: state.awaiting_handle(),
            command: Some(WorkflowCommand::CollectHandle { post_id }),
        },
        (WorkflowPhase::Publishing, WorkflowEvent::PublishFailed(failure)) => Transition {
            state: state.failed(failure),
            command: None,
        },
        (WorkflowPhase::AwaitingHandle, WorkflowEvent::HandleResolved) => Transition {
            state: state.completed(),
            command: None,
        },
        (phase, event) => {
            warn!(
                phase = %phase,
                event = ?event,
                "Event does not apply to the current phase, ignoring"
            );
            Transition {
                state: state.clone(),
                command: None,
            }
        }
    }
}
