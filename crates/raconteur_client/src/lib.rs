//! HTTP client and settings gate for the raconteur publishing workflow.
//!
//! This crate implements the network-facing half of the workflow: the three
//! publishing endpoints wrapped by [`PublishClient`], and the cached,
//! fail-open [`SettingsGate`]. Configuration for both loads from
//! `raconteur.toml` with bundled defaults.
//!
//! The client never retries. A failed call surfaces immediately and a
//! retry, if any, is a fresh workflow run triggered by the user.

#![warn(missing_docs)]

mod client;
mod config;
mod envelope;
mod gate;

pub use client::PublishClient;
pub use config::{ApiConfig, GateConfig, RaconteurConfig, WorkflowConfig};
pub use envelope::{codes, ApiEnvelope, ApiErrorBody};
pub use gate::SettingsGate;
