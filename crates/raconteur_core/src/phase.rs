//! Workflow phase enumeration.

use serde::{Deserialize, Serialize};

/// Phase of a publishing workflow.
///
/// Phases only advance forward. `Failed` is reachable from `Rendering` and
/// `Publishing`; `Completed` is reachable from `AwaitingHandle` or directly
/// from `Idle` when the settings gate short-circuits a run.
///
/// # Examples
///
/// ```
/// use raconteur_core::WorkflowPhase;
///
/// assert!(!WorkflowPhase::Publishing.is_terminal());
/// assert!(WorkflowPhase::Completed.is_terminal());
/// assert_eq!(format!("{}", WorkflowPhase::AwaitingHandle), "AwaitingHandle");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowPhase {
    /// No work started yet
    Idle,
    /// Carousel slide images are being rendered
    Rendering,
    /// The carousel is being posted to the platform
    Publishing,
    /// The post is live; waiting on the optional handle prompt
    AwaitingHandle,
    /// Terminal success (or a gate-skipped run)
    Completed,
    /// Terminal failure from rendering or publishing
    Failed,
}

impl WorkflowPhase {
    /// Whether the workflow has reached a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}
