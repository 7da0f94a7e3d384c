//! Publishing workflow orchestration for raconteur.
//!
//! This crate turns a generated story into a published carousel through an
//! explicit state machine: check the settings gate, render slides, post the
//! carousel, then offer a short window to credit a viewer's handle.
//!
//! # Features
//!
//! - **Pure transitions**: one `(state, event)` function decides every move
//! - **Progress as data**: each transition is projected into a view a UI
//!   can render without tracking history
//! - **Deadline-safe handle prompt**: a single atomic flag settles races
//!   between submissions and the timeout
//! - **One run per story**: concurrent starts for the same story are
//!   rejected, not queued
//!
//! # Example
//!
//! ```rust,ignore
//! use raconteur_core::StoryId;
//! use raconteur_workflow::{PublishOrchestrator, WorkflowOptions};
//! use std::sync::Arc;
//!
//! # async fn example(api: Arc<dyn raconteur_interface::PublishApi>,
//! #                  gate: Arc<dyn raconteur_interface::PublishingGate>)
//! # -> raconteur_error::RaconteurResult<()> {
//! let orchestrator = PublishOrchestrator::new(api, gate, WorkflowOptions::default());
//! let handle = orchestrator.start(StoryId::new("story-42")?)?;
//!
//! let mut progress = handle.subscribe();
//! let session = handle.session();
//! let report = handle.wait().await?;
//! println!("finished in phase {}", report.phase());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod machine;
mod options;
mod orchestrator;
mod prompt;
mod reporter;
mod trigger;

pub use machine::{Transition, WorkflowCommand, WorkflowEvent, step};
pub use options::WorkflowOptions;
pub use orchestrator::{PublishOrchestrator, WorkflowHandle};
pub use prompt::HandleSession;
pub use reporter::ProgressReporter;
pub use trigger::{AutoPublisher, ManualPublisher};
