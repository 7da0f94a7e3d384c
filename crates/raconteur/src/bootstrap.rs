//! Configuration-driven construction of the publishing stack.

use raconteur_client::{PublishClient, RaconteurConfig, SettingsGate};
use raconteur_error::RaconteurResult;
use raconteur_workflow::{PublishOrchestrator, WorkflowOptions};
use std::sync::Arc;
use std::time::Duration;

/// Build a [`PublishOrchestrator`] wired to the live publishing API.
///
/// The HTTP client and the settings gate both come from `config`; the
/// prompt deadline, progress buffering, and preview caching come from its
/// `[workflow]` and `[cache]` tables.
///
/// Build one orchestrator and clone it wherever publishing is triggered
/// from. Clones share the preview cache and the one-workflow-per-story
/// guard; separately built orchestrators do not.
///
/// # Errors
///
/// Returns an error when the configured endpoint settings produce an
/// unusable HTTP client.
pub fn orchestrator_from_config(config: &RaconteurConfig) -> RaconteurResult<PublishOrchestrator> {
    let client = PublishClient::new(config.api())?;
    let gate = SettingsGate::new(config.api(), config.gate())?;
    let options = WorkflowOptions::default()
        .with_handle_deadline(Duration::from_secs(*config.workflow().handle_deadline_secs()))
        .with_progress_capacity(*config.workflow().progress_capacity())
        .with_cache(config.cache().clone());

    Ok(PublishOrchestrator::new(
        Arc::new(client),
        Arc::new(gate),
        options,
    ))
}
