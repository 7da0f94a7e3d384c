//! Workflow orchestration error types.

/// Kinds of workflow orchestration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// A second start was attempted while a workflow for the story is live
    #[display("A publish workflow is already running for story {}", _0)]
    AlreadyRunning(String),
    /// A handle was submitted after the prompt resolved
    #[display("Handle prompt already resolved")]
    PromptClosed,
    /// A handle was submitted after the prompt deadline passed
    #[display("Handle prompt deadline has passed")]
    PromptExpired,
    /// The workflow task ended without producing a report
    #[display("Workflow for story {} was interrupted", _0)]
    Interrupted(String),
    /// A share was requested for a story that has no rendered preview
    #[display("Story {} has no preview to share", _0)]
    NothingToShare(String),
}

/// Workflow error with location tracking.
///
/// # Examples
///
/// ```
/// use raconteur_error::{WorkflowError, WorkflowErrorKind};
///
/// let err = WorkflowError::new(WorkflowErrorKind::PromptClosed);
/// assert!(format!("{}", err).contains("already resolved"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The kind of error that occurred
    pub kind: WorkflowErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new workflow error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
