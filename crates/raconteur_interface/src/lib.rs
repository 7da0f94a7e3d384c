//! Trait definitions for the raconteur publishing workflow.
//!
//! This crate provides the seams between the workflow orchestrator and its
//! external collaborators: the publishing endpoints and the settings gate.

mod traits;
mod types;

pub use traits::{PublishApi, PublishingGate};
pub use types::ProgressView;
