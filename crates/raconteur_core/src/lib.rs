//! Core data types for the raconteur publishing workflow.
//!
//! This crate provides the foundation data types used across all raconteur
//! crates: identifiers, validated text inputs, the workflow state model, and
//! the payloads produced by a publishing run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caption;
mod failure;
mod handle;
mod id;
mod outcome;
mod phase;
mod preview;
mod report;
mod state;
mod theme;

pub use caption::{Caption, MAX_CAPTION_CHARS};
pub use failure::{FailureClass, PublishFailure};
pub use handle::{Handle, MAX_HANDLE_CHARS};
pub use id::{StoryId, WorkflowId};
pub use outcome::{CommentOutcome, HandleResolution, PublishResult};
pub use phase::WorkflowPhase;
pub use preview::{PreviewResult, SlideImage};
pub use report::WorkflowReport;
pub use state::WorkflowState;
pub use theme::CarouselTheme;
