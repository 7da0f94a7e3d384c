//! Workflow orchestration.
//!
//! One spawned task drives each workflow: it executes commands from the
//! transition function, feeds the results back in as events, and emits a
//! progress view on every transition. The orchestrator owns the preview
//! cache and the one-workflow-per-story guard shared by all runs.

use crate::machine::{self, Transition, WorkflowCommand, WorkflowEvent};
use crate::options::WorkflowOptions;
use crate::prompt::{self, HandlePrompt, HandleSession};
use crate::reporter::ProgressReporter;
use parking_lot::Mutex;
use raconteur_cache::PreviewCache;
use raconteur_core::{
    CommentOutcome, HandleResolution, PreviewResult, PublishFailure, PublishResult, StoryId,
    WorkflowId, WorkflowReport, WorkflowState,
};
use raconteur_error::{RaconteurResult, WorkflowError, WorkflowErrorKind};
use raconteur_interface::{ProgressView, PublishApi, PublishingGate};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, error, info, instrument, warn};

/// A caller's connection to one running workflow.
///
/// Subscribe for progress and grab the handle session before awaiting the
/// report; `wait` consumes the handle.
#[derive(Debug)]
pub struct WorkflowHandle {
    workflow: WorkflowId,
    story: StoryId,
    progress: broadcast::Sender<ProgressView>,
    session: HandleSession,
    report: oneshot::Receiver<WorkflowReport>,
}

impl WorkflowHandle {
    /// Id of this run.
    pub fn workflow(&self) -> WorkflowId {
        self.workflow
    }

    /// Story this run publishes.
    pub fn story(&self) -> &StoryId {
        &self.story
    }

    /// Subscribe to progress views, one per transition.
    ///
    /// A subscriber only sees transitions that happen after it subscribes;
    /// each view is a full projection, so the latest one is always enough
    /// to draw from.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressView> {
        self.progress.subscribe()
    }

    /// The handle prompt session for this run.
    pub fn session(&self) -> HandleSession {
        self.session.clone()
    }

    /// Wait for the workflow to reach a terminal phase.
    pub async fn wait(self) -> RaconteurResult<WorkflowReport> {
        let WorkflowHandle { story, report, .. } = self;
        report.await.map_err(|_| {
            WorkflowError::new(WorkflowErrorKind::Interrupted(story.to_string())).into()
        })
    }
}

struct OrchestratorInner {
    api: Arc<dyn PublishApi>,
    gate: Arc<dyn PublishingGate>,
    options: WorkflowOptions,
    cache: Mutex<PreviewCache>,
    // Stories the user has browsed a render of. Kept apart from the cache
    // so disabling caching does not block the manual share flow.
    previewed: Mutex<HashSet<StoryId>>,
    in_flight: Mutex<HashSet<StoryId>>,
}

/// Starts and supervises publishing workflows.
///
/// Clones share the same cache and in-flight registry, so every entry
/// point sees the same picture of what is running and what is rendered.
#[derive(Clone)]
pub struct PublishOrchestrator {
    inner: Arc<OrchestratorInner>,
}

impl PublishOrchestrator {
    /// Create an orchestrator over an API client and settings gate.
    pub fn new(
        api: Arc<dyn PublishApi>,
        gate: Arc<dyn PublishingGate>,
        options: WorkflowOptions,
    ) -> Self {
        let cache = PreviewCache::new(options.cache().clone());
        Self {
            inner: Arc::new(OrchestratorInner {
                api,
                gate,
                options,
                cache: Mutex::new(cache),
                previewed: Mutex::new(HashSet::new()),
                in_flight: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Start a workflow for a story.
    ///
    /// At most one workflow may be live per story; a second start while one
    /// is running is rejected. The workflow runs on a spawned task, so this
    /// must be called within a Tokio runtime.
    #[instrument(skip(self), fields(story = %story))]
    pub fn start(&self, story: StoryId) -> RaconteurResult<WorkflowHandle> {
        if !self.inner.in_flight.lock().insert(story.clone()) {
            warn!("Rejected start, a workflow for this story is already running");
            return Err(
                WorkflowError::new(WorkflowErrorKind::AlreadyRunning(story.to_string())).into(),
            );
        }

        let workflow = WorkflowId::new();
        let (progress_tx, _) = broadcast::channel(*self.inner.options.progress_capacity());
        let (report_tx, report_rx) = oneshot::channel();
        let (session, handle_prompt) = prompt::open_prompt();

        info!(workflow = %workflow, "Starting publish workflow");
        tokio::spawn(drive(
            self.inner.clone(),
            workflow,
            story.clone(),
            progress_tx.clone(),
            handle_prompt,
            report_tx,
        ));

        Ok(WorkflowHandle {
            workflow,
            story,
            progress: progress_tx,
            session,
            report: report_rx,
        })
    }

    /// Render a story's preview for browsing, caching it when caching is on.
    ///
    /// The story is marked as previewed regardless of the cache setting, so
    /// [`was_previewed`](Self::was_previewed) answers from what the user saw,
    /// not from what the cache retained.
    #[instrument(skip(self), fields(story = %story))]
    pub async fn render_preview(&self, story: &StoryId) -> RaconteurResult<PreviewResult> {
        let preview = self.inner.api.render_preview(story).await?;
        self.inner.cache.lock().insert(story.clone(), preview.clone());
        self.inner.previewed.lock().insert(story.clone());
        Ok(preview)
    }

    /// The cached preview for a story, refreshing its recency.
    pub fn cached_preview(&self, story: &StoryId) -> Option<PreviewResult> {
        self.inner
            .cache
            .lock()
            .get(story)
            .map(|entry| entry.preview().clone())
    }

    /// Whether a preview is cached, without touching recency.
    pub fn has_preview(&self, story: &StoryId) -> bool {
        self.inner.cache.lock().contains(story)
    }

    /// Whether the story has been rendered for browsing and not discarded.
    pub fn was_previewed(&self, story: &StoryId) -> bool {
        self.inner.previewed.lock().contains(story)
    }

    /// Drop a story's cached preview and its previewed mark, for example
    /// after regeneration. Returns whether either was held.
    #[instrument(skip(self), fields(story = %story))]
    pub fn invalidate_preview(&self, story: &StoryId) -> bool {
        let previewed = self.inner.previewed.lock().remove(story);
        self.inner.cache.lock().invalidate(story) || previewed
    }

    /// Whether a workflow is currently live for the story.
    pub fn is_running(&self, story: &StoryId) -> bool {
        self.inner.in_flight.lock().contains(story)
    }
}

/// Execute commands and feed resulting events through the transition
/// function until the workflow settles.
#[instrument(skip_all, fields(workflow = %workflow, story = %story))]
async fn drive(
    inner: Arc<OrchestratorInner>,
    workflow: WorkflowId,
    story: StoryId,
    progress: broadcast::Sender<ProgressView>,
    handle_prompt: HandlePrompt,
    report: oneshot::Sender<WorkflowReport>,
) {
    let mut state = WorkflowState::idle(story.clone());
    let mut command = Some(WorkflowCommand::CheckGate);
    let mut publish: Option<PublishResult> = None;
    let mut comment: Option<CommentOutcome> = None;
    let mut resolution: Option<HandleResolution> = None;
    let mut handle_prompt = Some(handle_prompt);

    emit(&progress, &state);

    while let Some(next) = command.take() {
        let event = match next {
            WorkflowCommand::CheckGate => {
                let enabled = inner.gate.publishing_enabled().await;
                if !enabled {
                    info!("Publishing disabled, skipping the run");
                }
                WorkflowEvent::GateChecked { enabled }
            }
            WorkflowCommand::Render => match inner.api.render_preview(&story).await {
                Ok(preview) => {
                    debug!(slides = preview.slide_count(), "Preview rendered");
                    inner.cache.lock().insert(story.clone(), preview);
                    WorkflowEvent::RenderSucceeded
                }
                Err(e) => {
                    error!(error = %e, "Render failed");
                    WorkflowEvent::RenderFailed(PublishFailure::from_error(&e))
                }
            },
            WorkflowCommand::Publish => match inner.api.publish(&story).await {
                Ok(result) => {
                    info!(
                        post = %result.post_id,
                        slides = result.slide_count,
                        "Carousel published"
                    );
                    let post_id = result.post_id.clone();
                    publish = Some(result);
                    WorkflowEvent::PublishSucceeded { post_id }
                }
                Err(e) => {
                    error!(error = %e, "Publish failed");
                    WorkflowEvent::PublishFailed(PublishFailure::from_error(&e))
                }
            },
            WorkflowCommand::CollectHandle { post_id } => match handle_prompt.take() {
                Some(prompt) => {
                    let (outcome, how) = prompt
                        .collect(
                            inner.api.as_ref(),
                            &post_id,
                            *inner.options.handle_deadline(),
                        )
                        .await;
                    info!(resolution = %how, "Handle prompt resolved");
                    comment = Some(outcome);
                    resolution = Some(how);
                    WorkflowEvent::HandleResolved
                }
                // The machine visits AwaitingHandle once, so the prompt is
                // always present here; satisfy the type anyway.
                None => WorkflowEvent::HandleResolved,
            },
        };

        let Transition {
            state: next_state,
            command: next_command,
        } = machine::step(&state, event);
        state = next_state;
        command = next_command;
        emit(&progress, &state);
    }

    if let Some(prompt) = handle_prompt.take() {
        // Ended before the prompt opened; late submissions now error out.
        prompt.close();
    }

    inner.in_flight.lock().remove(&story);
    info!(phase = %state.phase(), "Workflow settled");

    let payload = WorkflowReport {
        state,
        publish,
        comment,
        resolution,
    };
    if report.send(payload).is_err() {
        debug!("No caller is waiting on the workflow report");
    }
}

fn emit(progress: &broadcast::Sender<ProgressView>, state: &WorkflowState) {
    // A send with no subscribers is fine; progress is advisory.
    let _ = progress.send(ProgressReporter::project(state));
}
