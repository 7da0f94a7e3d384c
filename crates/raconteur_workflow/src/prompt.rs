//! Post-publish handle prompt.
//!
//! After a carousel goes live the workflow offers one chance to credit a
//! viewer: submit a handle and a follow-up comment is posted, skip, or let
//! the deadline pass. Resolution is guarded by a single atomic flag that
//! moves away from [`OPEN`] exactly once, so a submission racing the
//! deadline is settled by whoever claims the flag first, never by timing
//! luck downstream.

use raconteur_core::{CommentOutcome, Handle, HandleResolution};
use raconteur_error::{RaconteurResult, WorkflowError, WorkflowErrorKind};
use raconteur_interface::PublishApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// No resolution yet; the only state the flag can leave.
const OPEN: u8 = 0;
/// A submission or skip claimed the prompt.
const RESOLVED: u8 = 1;
/// The deadline claimed the prompt.
const EXPIRED: u8 = 2;
/// The workflow ended before the prompt opened.
const CLOSED: u8 = 3;

#[derive(Debug)]
enum PromptAction {
    Submit(Handle),
    Skip,
}

/// Caller's side of the handle prompt.
///
/// Cloneable; every clone shares the same resolution flag. Input is
/// accepted any time before resolution, even before the prompt opens, in
/// which case it is applied the moment the post goes live.
#[derive(Debug, Clone)]
pub struct HandleSession {
    flag: Arc<AtomicU8>,
    actions: mpsc::UnboundedSender<PromptAction>,
}

impl HandleSession {
    /// Submit a viewer handle for the follow-up comment.
    ///
    /// Validates and normalizes the input, then claims the prompt's
    /// resolution. An `Ok` means the submission was accepted before the
    /// deadline; whether the comment was actually posted arrives in the
    /// workflow report, since the comment call itself may still fail
    /// without failing the workflow.
    pub fn submit(&self, raw: &str) -> RaconteurResult<()> {
        let handle = Handle::new(raw)?;
        self.claim()?;
        debug!(handle = %handle, "Handle submission accepted");
        self.send(PromptAction::Submit(handle))
    }

    /// Resolve the prompt without posting a comment.
    pub fn skip(&self) -> RaconteurResult<()> {
        self.claim()?;
        debug!("Handle prompt skipped by the user");
        self.send(PromptAction::Skip)
    }

    /// Whether the prompt has already resolved.
    pub fn is_resolved(&self) -> bool {
        self.flag.load(Ordering::SeqCst) != OPEN
    }

    /// Claim resolution of the prompt.
    ///
    /// This check-and-set is the tie-break against the deadline: whoever
    /// moves the flag away from `OPEN` first wins, and a late submission
    /// can never overwrite an expired or closed prompt.
    fn claim(&self) -> RaconteurResult<()> {
        match self
            .flag
            .compare_exchange(OPEN, RESOLVED, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Ok(()),
            Err(EXPIRED) => Err(WorkflowError::new(WorkflowErrorKind::PromptExpired).into()),
            Err(_) => Err(WorkflowError::new(WorkflowErrorKind::PromptClosed).into()),
        }
    }

    fn send(&self, action: PromptAction) -> RaconteurResult<()> {
        if self.actions.send(action).is_err() {
            // The prompt task is gone; the claim can never be applied.
            return Err(WorkflowError::new(WorkflowErrorKind::PromptClosed).into());
        }
        Ok(())
    }
}

/// Driver's side of the handle prompt.
pub(crate) struct HandlePrompt {
    flag: Arc<AtomicU8>,
    actions: mpsc::UnboundedReceiver<PromptAction>,
}

/// Create a connected session and prompt pair.
pub(crate) fn open_prompt() -> (HandleSession, HandlePrompt) {
    let (tx, rx) = mpsc::unbounded_channel();
    let flag = Arc::new(AtomicU8::new(OPEN));
    (
        HandleSession {
            flag: flag.clone(),
            actions: tx,
        },
        HandlePrompt { flag, actions: rx },
    )
}

impl HandlePrompt {
    /// Run the prompt until a submission, a skip, or the deadline resolves
    /// it.
    ///
    /// Pending input is favored over a simultaneously expiring deadline,
    /// and a claim that lands just before the deadline check is still
    /// honored after it.
    #[instrument(skip(self, api), fields(post = %post_id))]
    pub(crate) async fn collect(
        mut self,
        api: &dyn PublishApi,
        post_id: &str,
        deadline: Duration,
    ) -> (CommentOutcome, HandleResolution) {
        let expiry = tokio::time::sleep(deadline);
        tokio::pin!(expiry);

        let received = tokio::select! {
            biased;
            action = self.actions.recv() => Some(action),
            () = &mut expiry => None,
        };

        match received {
            Some(Some(action)) => self.apply(api, post_id, action).await,
            Some(None) => {
                // Every session clone was dropped, so nothing can arrive
                // anymore. Hold until the deadline to keep the schedule.
                expiry.await;
                self.expire()
            }
            None => {
                if self
                    .flag
                    .compare_exchange(OPEN, EXPIRED, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    info!("Handle prompt deadline passed with no submission");
                    (CommentOutcome::not_submitted(), HandleResolution::Expired)
                } else {
                    // A claim beat the deadline check; its action is in
                    // flight and still wins.
                    debug!("Submission claimed the prompt just before the deadline");
                    match self.actions.recv().await {
                        Some(action) => self.apply(api, post_id, action).await,
                        None => (CommentOutcome::not_submitted(), HandleResolution::Expired),
                    }
                }
            }
        }
    }

    /// Mark an unopened prompt as closed when the workflow ends early.
    pub(crate) fn close(&self) {
        let _ = self
            .flag
            .compare_exchange(OPEN, CLOSED, Ordering::SeqCst, Ordering::SeqCst);
    }

    async fn apply(
        &self,
        api: &dyn PublishApi,
        post_id: &str,
        action: PromptAction,
    ) -> (CommentOutcome, HandleResolution) {
        match action {
            PromptAction::Submit(handle) => {
                debug!(handle = %handle, "Posting handle comment");
                match api.post_handle_comment(post_id, &handle).await {
                    Ok(outcome) => (outcome, HandleResolution::Submitted),
                    Err(e) => {
                        // Comment failures are soft: the carousel is live,
                        // so the workflow still completes.
                        warn!(error = %e, "Handle comment failed, completing without it");
                        (CommentOutcome::not_submitted(), HandleResolution::CommentFailed)
                    }
                }
            }
            PromptAction::Skip => (CommentOutcome::not_submitted(), HandleResolution::Skipped),
        }
    }

    fn expire(&self) -> (CommentOutcome, HandleResolution) {
        let _ = self
            .flag
            .compare_exchange(OPEN, EXPIRED, Ordering::SeqCst, Ordering::SeqCst);
        info!("Handle prompt deadline passed with no submission");
        (CommentOutcome::not_submitted(), HandleResolution::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raconteur_core::{PreviewResult, PublishResult, StoryId};
    use raconteur_error::{CommentError, RaconteurErrorKind};

    #[derive(Default)]
    struct CommentApi {
        fail_comment: bool,
        comments: parking_lot::Mutex<Vec<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl PublishApi for CommentApi {
        async fn render_preview(&self, _story: &StoryId) -> RaconteurResult<PreviewResult> {
            unreachable!("prompt never renders")
        }

        async fn publish(&self, _story: &StoryId) -> RaconteurResult<PublishResult> {
            unreachable!("prompt never publishes")
        }

        async fn post_handle_comment(
            &self,
            post_id: &str,
            handle: &Handle,
        ) -> RaconteurResult<CommentOutcome> {
            self.comments
                .lock()
                .push((post_id.to_string(), handle.as_str().to_string()));
            if self.fail_comment {
                return Err(CommentError::new("comment rejected").into());
            }
            Ok(CommentOutcome::submitted(handle.clone(), "c-1"))
        }
    }

    fn prompt_expired(err: &raconteur_error::RaconteurError) -> bool {
        matches!(
            err.kind(),
            RaconteurErrorKind::Workflow(w) if w.kind == WorkflowErrorKind::PromptExpired
        )
    }

    fn prompt_closed(err: &raconteur_error::RaconteurError) -> bool {
        matches!(
            err.kind(),
            RaconteurErrorKind::Workflow(w) if w.kind == WorkflowErrorKind::PromptClosed
        )
    }

    #[test]
    fn submit_rejects_invalid_handles_without_claiming() {
        let (session, _prompt) = open_prompt();
        assert!(session.submit("jane doe").is_err());
        assert!(!session.is_resolved());
    }

    #[test]
    fn only_the_first_resolution_wins() {
        let (session, _prompt) = open_prompt();
        session.submit("@jane").unwrap();
        let err = session.submit("@john").unwrap_err();
        assert!(prompt_closed(&err));
        let err = session.skip().unwrap_err();
        assert!(prompt_closed(&err));
    }

    #[tokio::test]
    async fn submission_posts_the_comment() {
        let (session, prompt) = open_prompt();
        let api = CommentApi::default();
        session.submit("@jane_doe").unwrap();

        let (outcome, resolution) = prompt
            .collect(&api, "post-42", Duration::from_secs(30))
            .await;

        assert_eq!(resolution, HandleResolution::Submitted);
        assert!(outcome.submitted);
        assert_eq!(outcome.comment_id.as_deref(), Some("c-1"));
        assert_eq!(
            api.comments.lock().as_slice(),
            &[("post-42".to_string(), "jane_doe".to_string())]
        );
    }

    #[tokio::test]
    async fn failed_comment_resolves_without_submission() {
        let (session, prompt) = open_prompt();
        let api = CommentApi {
            fail_comment: true,
            ..Default::default()
        };
        session.submit("@jane").unwrap();

        let (outcome, resolution) = prompt
            .collect(&api, "post-42", Duration::from_secs(30))
            .await;

        assert_eq!(resolution, HandleResolution::CommentFailed);
        assert!(!outcome.submitted);
        assert_eq!(outcome.handle, None);
    }

    #[tokio::test]
    async fn skip_resolves_without_a_comment_call() {
        let (session, prompt) = open_prompt();
        let api = CommentApi::default();
        session.skip().unwrap();

        let (outcome, resolution) = prompt
            .collect(&api, "post-42", Duration::from_secs(30))
            .await;

        assert_eq!(resolution, HandleResolution::Skipped);
        assert!(!outcome.submitted);
        assert!(api.comments.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expires_the_prompt() {
        let (session, prompt) = open_prompt();
        let api = CommentApi::default();

        let (outcome, resolution) = prompt
            .collect(&api, "post-42", Duration::from_secs(30))
            .await;

        assert_eq!(resolution, HandleResolution::Expired);
        assert!(!outcome.submitted);
        assert!(api.comments.lock().is_empty());

        let err = session.submit("@late").unwrap_err();
        assert!(prompt_expired(&err));
        assert!(session.is_resolved());
    }

    #[tokio::test(start_paused = true)]
    async fn submission_during_the_window_beats_the_deadline() {
        let (session, prompt) = open_prompt();
        let api = CommentApi::default();

        let submitter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            session.submit("@jane").unwrap();
        });

        let (outcome, resolution) = prompt
            .collect(&api, "post-42", Duration::from_secs(30))
            .await;
        submitter.await.unwrap();

        assert_eq!(resolution, HandleResolution::Submitted);
        assert!(outcome.submitted);
    }

    #[test]
    fn closing_an_unopened_prompt_rejects_later_submissions() {
        let (session, prompt) = open_prompt();
        prompt.close();
        let err = session.submit("@jane").unwrap_err();
        assert!(prompt_closed(&err));
    }

    #[test]
    fn close_does_not_overwrite_an_existing_claim() {
        let (session, prompt) = open_prompt();
        session.submit("@jane").unwrap();
        prompt.close();
        // Still resolved as a submission, not reopened or reclassified.
        let err = session.skip().unwrap_err();
        assert!(prompt_closed(&err));
    }
}
