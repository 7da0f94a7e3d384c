//! End-to-end workflow tests over a scripted publish API.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use raconteur_core::{
    Caption, CommentOutcome, FailureClass, Handle, HandleResolution, PreviewResult, PublishResult,
    SlideImage, StoryId, WorkflowPhase,
};
use raconteur_error::{
    CommentError, HttpError, PublishError, PublishErrorKind, RaconteurError, RaconteurErrorKind,
    RaconteurResult, RenderError, RenderErrorKind, WorkflowErrorKind,
};
use raconteur_cache::PreviewCacheConfig;
use raconteur_interface::{ProgressView, PublishApi, PublishingGate};
use raconteur_workflow::{AutoPublisher, ManualPublisher, PublishOrchestrator, WorkflowOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Default)]
struct CallLog {
    renders: usize,
    publishes: usize,
    comments: Vec<(String, String)>,
}

/// Publish API with scripted failures that records every call.
#[derive(Default)]
struct ScriptedApi {
    render_error: Option<fn() -> RaconteurError>,
    publish_error: Option<fn() -> RaconteurError>,
    comment_fails: bool,
    calls: Mutex<CallLog>,
}

fn preview() -> PreviewResult {
    PreviewResult {
        slides: vec![
            SlideImage {
                url: "https://cdn.example.com/previews/story-981/0.png".to_string(),
                alt_text: Some("Title slide".to_string()),
            },
            SlideImage {
                url: "https://cdn.example.com/previews/story-981/1.png".to_string(),
                alt_text: None,
            },
            SlideImage {
                url: "https://cdn.example.com/previews/story-981/2.png".to_string(),
                alt_text: None,
            },
        ],
        caption: Caption::new("A winter tale, in three parts.").unwrap(),
        theme: None,
    }
}

fn publish_result() -> PublishResult {
    PublishResult {
        post_id: "post-981".to_string(),
        carousel_url: Some("https://social.example.com/p/post-981".to_string()),
        slide_count: 3,
        published_at: Utc::now(),
    }
}

#[async_trait]
impl PublishApi for ScriptedApi {
    async fn render_preview(&self, _story: &StoryId) -> RaconteurResult<PreviewResult> {
        self.calls.lock().renders += 1;
        match self.render_error {
            Some(make) => Err(make()),
            None => Ok(preview()),
        }
    }

    async fn publish(&self, _story: &StoryId) -> RaconteurResult<PublishResult> {
        self.calls.lock().publishes += 1;
        match self.publish_error {
            Some(make) => Err(make()),
            None => Ok(publish_result()),
        }
    }

    async fn post_handle_comment(
        &self,
        post_id: &str,
        handle: &Handle,
    ) -> RaconteurResult<CommentOutcome> {
        self.calls
            .lock()
            .comments
            .push((post_id.to_string(), handle.as_str().to_string()));
        if self.comment_fails {
            return Err(CommentError::new("platform rejected the comment").into());
        }
        Ok(CommentOutcome::submitted(handle.clone(), "comment-1"))
    }
}

struct StaticGate(bool);

#[async_trait]
impl PublishingGate for StaticGate {
    async fn publishing_enabled(&self) -> bool {
        self.0
    }
}

fn orchestrator(api: Arc<ScriptedApi>, enabled: bool) -> PublishOrchestrator {
    PublishOrchestrator::new(api, Arc::new(StaticGate(enabled)), WorkflowOptions::default())
}

fn story() -> StoryId {
    StoryId::new("story-981").unwrap()
}

/// Drain the progress views emitted so far.
fn drain(rx: &mut broadcast::Receiver<ProgressView>) -> Vec<ProgressView> {
    let mut views = Vec::new();
    while let Ok(view) = rx.try_recv() {
        views.push(view);
    }
    views
}

#[tokio::test]
async fn render_failure_fails_the_run_without_publishing() {
    let api = Arc::new(ScriptedApi {
        render_error: Some(|| HttpError::new("connection reset by peer").into()),
        ..Default::default()
    });
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    let mut progress = handle.subscribe();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Failed);
    let failure = report.state.failure().as_ref().unwrap();
    assert_eq!(failure.class, FailureClass::Generic);
    assert!(failure.message.contains("connection reset by peer"));
    assert_eq!(report.publish, None);
    assert_eq!(report.comment, None);
    assert_eq!(report.resolution, None);

    let calls = api.calls.lock();
    assert_eq!(calls.renders, 1);
    assert_eq!(calls.publishes, 0, "publish must not run after a failed render");
    assert!(calls.comments.is_empty());
    drop(calls);

    let labels: Vec<_> = drain(&mut progress).iter().map(|v| v.step_label).collect();
    assert_eq!(labels, vec!["queued", "render", "failed"]);
}

#[tokio::test]
async fn malformed_story_failure_is_classified_as_render() {
    let api = Arc::new(ScriptedApi {
        render_error: Some(|| {
            RenderError::new(RenderErrorKind::MalformedStory(
                "story has no body text".to_string(),
            ))
            .into()
        }),
        ..Default::default()
    });
    let orch = orchestrator(api, true);

    let report = orch.start(story()).unwrap().wait().await.unwrap();
    let failure = report.state.failure().as_ref().unwrap();
    assert_eq!(failure.class, FailureClass::Render);
    assert!(failure.message.contains("story has no body text"));
}

#[tokio::test]
async fn rate_limited_publish_reports_the_manual_path() {
    let api = Arc::new(ScriptedApi {
        publish_error: Some(|| {
            PublishError::new(PublishErrorKind::RateLimited {
                message: "daily posting quota reached".to_string(),
                retry_after_secs: Some(600),
            })
            .into()
        }),
        ..Default::default()
    });
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    let mut progress = handle.subscribe();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Failed);
    let failure = report.state.failure().as_ref().unwrap();
    assert_eq!(failure.class, FailureClass::RateLimited);
    assert_eq!(failure.retry_after_secs, Some(600));

    let views = drain(&mut progress);
    let last = views.last().unwrap();
    assert!(last.message.contains("manually"));
    assert!(last.message.contains("600"));

    // The render made it into the cache before the publish failed, so a
    // manual share can reuse it.
    assert!(orch.has_preview(&story()));
    let calls = api.calls.lock();
    assert_eq!((calls.renders, calls.publishes), (1, 1));
    assert!(calls.comments.is_empty());
}

#[tokio::test]
async fn auth_failure_is_classified_for_escalation() {
    let api = Arc::new(ScriptedApi {
        publish_error: Some(|| {
            PublishError::new(PublishErrorKind::Unauthorized(
                "platform token expired".to_string(),
            ))
            .into()
        }),
        ..Default::default()
    });
    let orch = orchestrator(api, true);

    let handle = orch.start(story()).unwrap();
    let mut progress = handle.subscribe();
    let report = handle.wait().await.unwrap();

    assert_eq!(
        report.state.failure().as_ref().map(|f| f.class),
        Some(FailureClass::Auth)
    );
    let views = drain(&mut progress);
    assert!(views.last().unwrap().message.contains("operator"));
}

#[tokio::test(start_paused = true)]
async fn submitted_handle_is_credited_in_a_comment() {
    let api = Arc::new(ScriptedApi::default());
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    let session = handle.session();
    let mut progress = handle.subscribe();

    // A viewer answers the prompt five seconds after it opens.
    let submitter = tokio::spawn(async move {
        loop {
            let view = progress.recv().await.expect("progress stream closed early");
            if view.step_label == "handle" {
                assert_eq!(view.message, "posted successfully");
                tokio::time::sleep(Duration::from_secs(5)).await;
                session.submit("@jane_doe").unwrap();
                break;
            }
        }
    });

    let report = handle.wait().await.unwrap();
    submitter.await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(report.resolution, Some(HandleResolution::Submitted));
    let comment = report.comment.unwrap();
    assert!(comment.submitted);
    assert_eq!(comment.comment_id.as_deref(), Some("comment-1"));
    assert_eq!(comment.handle.as_ref().map(|h| h.as_str()), Some("jane_doe"));
    assert_eq!(report.publish.unwrap().post_id, "post-981");
    assert_eq!(
        api.calls.lock().comments.as_slice(),
        &[("post-981".to_string(), "jane_doe".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn unanswered_prompt_expires_into_plain_completion() {
    let api = Arc::new(ScriptedApi::default());
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    let session = handle.session();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(report.resolution, Some(HandleResolution::Expired));
    let comment = report.comment.unwrap();
    assert!(!comment.submitted);
    assert_eq!(comment.handle, None);
    assert!(api.calls.lock().comments.is_empty());

    // The deadline owns the flag now; a late submission cannot reopen it.
    let err = session.submit("@too_late").unwrap_err();
    assert!(matches!(
        err.kind(),
        RaconteurErrorKind::Workflow(w) if w.kind == WorkflowErrorKind::PromptExpired
    ));
}

#[tokio::test]
async fn failed_comment_still_completes_the_workflow() {
    let api = Arc::new(ScriptedApi {
        comment_fails: true,
        ..Default::default()
    });
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    handle.session().submit("jane_doe").unwrap();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(report.resolution, Some(HandleResolution::CommentFailed));
    let comment = report.comment.unwrap();
    assert!(!comment.submitted);
    // The attempt was made; its failure did not fail the run.
    assert_eq!(api.calls.lock().comments.len(), 1);
    assert!(report.publish.is_some());
}

#[tokio::test]
async fn skip_resolves_the_prompt_without_a_comment() {
    let api = Arc::new(ScriptedApi::default());
    let orch = orchestrator(api.clone(), true);

    let handle = orch.start(story()).unwrap();
    handle.session().skip().unwrap();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(report.resolution, Some(HandleResolution::Skipped));
    assert!(api.calls.lock().comments.is_empty());
}

#[tokio::test]
async fn disabled_gate_skips_without_touching_the_network() {
    let api = Arc::new(ScriptedApi::default());
    let orch = orchestrator(api.clone(), false);

    let handle = orch.start(story()).unwrap();
    let session = handle.session();
    let mut progress = handle.subscribe();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert!(report.state.skipped());
    assert_eq!(*report.state.progress(), 100);
    assert_eq!(report.publish, None);
    assert_eq!(report.comment, None);
    assert_eq!(report.resolution, None);

    let calls = api.calls.lock();
    assert_eq!(
        (calls.renders, calls.publishes, calls.comments.len()),
        (0, 0, 0),
        "a skipped run must make no API calls"
    );
    drop(calls);

    let views = drain(&mut progress);
    let labels: Vec<_> = views.iter().map(|v| v.step_label).collect();
    assert_eq!(labels, vec!["queued", "done"]);
    assert!(views.last().unwrap().message.contains("disabled"));

    // The prompt never opened, so submissions are rejected as closed.
    let err = session.submit("@jane").unwrap_err();
    assert!(matches!(
        err.kind(),
        RaconteurErrorKind::Workflow(w) if w.kind == WorkflowErrorKind::PromptClosed
    ));
}

#[tokio::test]
async fn progress_views_arrive_in_pipeline_order() {
    let api = Arc::new(ScriptedApi::default());
    let orch = orchestrator(api, true);

    let handle = orch.start(story()).unwrap();
    // Resolve the prompt up front so the run completes without waiting.
    handle.session().submit("@jane_doe").unwrap();
    let mut progress = handle.subscribe();
    handle.wait().await.unwrap();

    let views = drain(&mut progress);
    let sequence: Vec<_> = views
        .iter()
        .map(|v| (v.step_index, v.step_label, v.percent))
        .collect();
    assert_eq!(
        sequence,
        vec![
            (0, "queued", 0),
            (1, "render", 50),
            (2, "publish", 80),
            (3, "handle", 100),
            (4, "done", 100),
        ]
    );
}

#[tokio::test]
async fn auto_publisher_runs_the_same_machine() {
    let api = Arc::new(ScriptedApi::default());
    let auto = AutoPublisher::new(orchestrator(api.clone(), true));

    let handle = auto.publish_generated(story()).unwrap();
    handle.session().skip().unwrap();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(api.calls.lock().publishes, 1);
}

#[tokio::test]
async fn manual_share_requires_a_browsable_preview() {
    let api = Arc::new(ScriptedApi::default());
    let manual = ManualPublisher::new(orchestrator(api.clone(), true));

    let err = manual.share(&story()).unwrap_err();
    assert!(matches!(
        err.kind(),
        RaconteurErrorKind::Workflow(w) if matches!(w.kind, WorkflowErrorKind::NothingToShare(_))
    ));
    assert_eq!(api.calls.lock().publishes, 0);

    let previewed = manual.preview(&story()).await.unwrap();
    assert_eq!(previewed.slide_count(), 3);
    assert_eq!(manual.cached(&story()), Some(previewed));

    let handle = manual.share(&story()).unwrap();
    handle.session().skip().unwrap();
    let report = handle.wait().await.unwrap();
    assert_eq!(report.phase(), WorkflowPhase::Completed);

    // One render for browsing, one inside the workflow; the server reuses
    // its cached render for the second.
    let calls = api.calls.lock();
    assert_eq!((calls.renders, calls.publishes), (2, 1));
}

#[tokio::test]
async fn disabled_cache_still_allows_a_browsed_share() {
    let api = Arc::new(ScriptedApi::default());
    let options = WorkflowOptions::default()
        .with_cache(PreviewCacheConfig::default().with_enabled(false));
    let orch = PublishOrchestrator::new(api.clone(), Arc::new(StaticGate(true)), options);
    let manual = ManualPublisher::new(orch);

    manual.preview(&story()).await.unwrap();
    // Nothing is retained locally, but the user did browse the render.
    assert_eq!(manual.cached(&story()), None);

    let handle = manual.share(&story()).unwrap();
    handle.session().skip().unwrap();
    let report = handle.wait().await.unwrap();
    assert_eq!(report.phase(), WorkflowPhase::Completed);
    assert_eq!(api.calls.lock().publishes, 1);

    // Discarding clears the previewed mark even without a cache entry.
    assert!(manual.discard(&story()));
    assert!(manual.share(&story()).is_err());
}

#[tokio::test]
async fn discarded_preview_blocks_a_new_share() {
    let api = Arc::new(ScriptedApi::default());
    let manual = ManualPublisher::new(orchestrator(api, true));

    manual.preview(&story()).await.unwrap();
    assert!(manual.discard(&story()));
    assert_eq!(manual.cached(&story()), None);
    assert!(manual.share(&story()).is_err());
}
