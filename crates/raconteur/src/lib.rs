//! Raconteur - Story Publishing Workflow
//!
//! Raconteur turns a generated story into a published multi-slide carousel
//! through an explicit, observable workflow: check the publishing gate,
//! render the slides, publish the carousel, then prompt for a social handle
//! to credit in a follow-up comment.
//!
//! # Features
//!
//! - **Explicit State Machine**: Named phases driven by a pure transition function
//! - **Progress Streaming**: A full display projection broadcast on every transition
//! - **Handle Prompt**: Post-publish handle collection with a hard deadline, resolved exactly once
//! - **Preview Cache**: Rendered carousels cached per story for browse-before-share
//! - **Settings Gate**: A remote kill switch checked once per run
//! - **Two Triggers**: Automatic publish-after-generation and manual preview-then-share
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use raconteur::{orchestrator_from_config, telemetry, RaconteurConfig, StoryId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     telemetry::init_console_telemetry()?;
//!
//!     let config = RaconteurConfig::load()?;
//!     let orchestrator = orchestrator_from_config(&config)?;
//!
//!     let handle = orchestrator.start(StoryId::new("story-1")?)?;
//!     let mut progress = handle.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(view) = progress.recv().await {
//!             println!("[{:>3}%] {}", view.percent, view.message);
//!         }
//!     });
//!
//!     let report = handle.wait().await?;
//!     println!("Workflow settled in phase {}", report.phase());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Raconteur is organized as a workspace with focused crates:
//!
//! - `raconteur_core` - Core data types (ids, validated inputs, workflow state)
//! - `raconteur_interface` - PublishApi and PublishingGate trait definitions
//! - `raconteur_error` - Error types
//! - `raconteur_cache` - Per-story preview cache with LRU eviction
//! - `raconteur_client` - HTTP client, settings gate, and configuration
//! - `raconteur_workflow` - State machine, orchestrator, and triggers
//!
//! This crate (`raconteur`) re-exports everything for convenience.

// Re-export the workspace crates
pub use raconteur_cache::*;
pub use raconteur_client::*;
pub use raconteur_core::*;
pub use raconteur_error::*;
pub use raconteur_interface::*;
pub use raconteur_workflow::*;

mod bootstrap;
pub mod telemetry;

pub use bootstrap::orchestrator_from_config;
