//! Publishing endpoint client.

use crate::envelope::{codes, ApiEnvelope, ApiErrorBody};
use crate::ApiConfig;
use async_trait::async_trait;
use chrono::Utc;
use raconteur_core::{
    Caption, CarouselTheme, CommentOutcome, Handle, PreviewResult, PublishResult, SlideImage,
    StoryId,
};
use raconteur_error::{
    CommentError, HttpError, JsonError, PublishError, PublishErrorKind, RaconteurError,
    RaconteurResult, RenderError, RenderErrorKind,
};
use raconteur_interface::PublishApi;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Client for the three publishing endpoints.
///
/// Wraps `POST publish/preview`, `POST publish/carousel`, and
/// `POST publish/comment`. Each call is a single request; nothing here
/// retries or queues.
#[derive(Debug, Clone)]
pub struct PublishClient {
    client: Client,
    base_url: String,
}

impl PublishClient {
    /// Create a new publishing client.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &ApiConfig) -> RaconteurResult<Self> {
        debug!("Creating publish client");
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl PublishApi for PublishClient {
    #[instrument(skip(self), fields(story = %story))]
    async fn render_preview(&self, story: &StoryId) -> RaconteurResult<PreviewResult> {
        debug!("Requesting carousel render");

        let response = self
            .client
            .post(self.endpoint("publish/preview"))
            .json(&PreviewRequest {
                story_id: story.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Render request failed to send");
                HttpError::new(format!("Render request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read render response: {}", e)))?;

        let envelope: ApiEnvelope<PreviewData> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !success_status(status) => {
                error!(status, "Render failed without an envelope");
                return Err(HttpError::new(format!("Render failed with HTTP {}", status)).into());
            }
            Err(e) => {
                return Err(
                    JsonError::new(format!("Failed to decode render response: {}", e)).into(),
                );
            }
        };

        if !envelope.success || !success_status(status) {
            return Err(render_failure(status, envelope.error));
        }

        let data = envelope.data.ok_or_else(|| {
            RenderError::new(RenderErrorKind::MissingPayload(story.to_string()))
        })?;
        let preview = into_preview(story, data)?;
        debug!(slide_count = preview.slide_count(), "Render succeeded");
        Ok(preview)
    }

    #[instrument(skip(self), fields(story = %story))]
    async fn publish(&self, story: &StoryId) -> RaconteurResult<PublishResult> {
        debug!("Publishing carousel");

        let response = self
            .client
            .post(self.endpoint("publish/carousel"))
            .json(&CarouselRequest {
                story_id: story.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Publish request failed to send");
                HttpError::new(format!("Publish request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let retry_after = parse_retry_after(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read publish response: {}", e)))?;

        let envelope: ApiEnvelope<CarouselData> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !success_status(status) => {
                error!(status, "Publish failed without an envelope");
                return Err(publish_failure(status, retry_after, None).into());
            }
            Err(e) => {
                return Err(
                    JsonError::new(format!("Failed to decode publish response: {}", e)).into(),
                );
            }
        };

        if !envelope.success || !success_status(status) {
            return Err(publish_failure(status, retry_after, envelope.error).into());
        }

        let data = envelope
            .data
            .ok_or_else(|| JsonError::new("Publish response carried no data"))?;
        let result = PublishResult {
            post_id: data.post_id,
            carousel_url: data.carousel_url,
            slide_count: data.slide_count,
            published_at: Utc::now(),
        };
        debug!(post_id = %result.post_id, "Publish succeeded");
        Ok(result)
    }

    #[instrument(skip(self, handle), fields(post_id, handle = %handle))]
    async fn post_handle_comment(
        &self,
        post_id: &str,
        handle: &Handle,
    ) -> RaconteurResult<CommentOutcome> {
        debug!("Posting handle comment");

        let response = self
            .client
            .post(self.endpoint("publish/comment"))
            .json(&CommentRequest {
                post_id,
                handle: handle.as_str(),
            })
            .send()
            .await
            .map_err(|e| CommentError::new(format!("Comment request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| CommentError::new(format!("Failed to read comment response: {}", e)))?;

        let envelope: ApiEnvelope<CommentData> = serde_json::from_slice(&body).map_err(|e| {
            CommentError::new(format!(
                "Failed to decode comment response (HTTP {}): {}",
                status, e
            ))
        })?;

        if !envelope.success || !success_status(status) {
            let message = envelope
                .error
                .map(|e| e.message_or_default())
                .unwrap_or_else(|| format!("HTTP {}", status));
            warn!(status, message, "Comment endpoint declared a failure");
            return Err(CommentError::new(format!("Comment rejected: {}", message)).into());
        }

        let data = envelope
            .data
            .ok_or_else(|| CommentError::new("Comment response carried no data"))?;
        debug!(comment_id = %data.comment_id, "Handle comment posted");
        Ok(CommentOutcome::submitted(handle.clone(), data.comment_id))
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRequest<'a> {
    story_id: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CarouselRequest<'a> {
    story_id: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentRequest<'a> {
    post_id: &'a str,
    handle: &'a str,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewData {
    slides: Vec<SlideData>,
    #[serde(default)]
    caption: String,
    #[serde(default)]
    theme: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlideData {
    url: String,
    #[serde(default)]
    alt_text: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarouselData {
    post_id: String,
    #[serde(default)]
    carousel_url: Option<String>,
    slide_count: usize,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentData {
    comment_id: String,
}

fn success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Helper to parse delta-seconds from the Retry-After header.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers.get("retry-after")?.to_str().ok()?.parse().ok()
}

/// Classify a failed render response.
///
/// Only a declared `render_failed` code means the story content was at
/// fault; everything else on this endpoint is a transport-level failure.
fn render_failure(status: u16, error: Option<ApiErrorBody>) -> RaconteurError {
    match error {
        Some(body) if body.code.as_deref() == Some(codes::RENDER_FAILED) => {
            RenderError::new(RenderErrorKind::MalformedStory(body.message_or_default())).into()
        }
        Some(body) => HttpError::new(format!(
            "Render failed with HTTP {}: {}",
            status,
            body.message_or_default()
        ))
        .into(),
        None => HttpError::new(format!("Render failed with HTTP {}", status)).into(),
    }
}

/// Classify a failed publish response.
///
/// The declared error code wins; the HTTP status is only a fallback when
/// the server sent no code. Retry hints prefer the envelope's value over
/// the Retry-After header.
fn publish_failure(
    status: u16,
    retry_after_header: Option<u64>,
    error: Option<ApiErrorBody>,
) -> PublishError {
    let (code, message, declared_retry) = match error {
        Some(body) => {
            let message = body.message_or_default();
            (body.code, message, body.retry_after_secs)
        }
        None => (None, format!("HTTP {}", status), None),
    };
    let retry_after_secs = declared_retry.or(retry_after_header);

    let kind = match code.as_deref() {
        Some(codes::RATE_LIMITED) => PublishErrorKind::RateLimited {
            message,
            retry_after_secs,
        },
        Some(codes::AUTH_FAILED) => PublishErrorKind::Unauthorized(message),
        Some(code) => PublishErrorKind::Rejected {
            code: code.to_string(),
            message,
        },
        None => match status {
            429 => PublishErrorKind::RateLimited {
                message,
                retry_after_secs,
            },
            401 | 403 => PublishErrorKind::Unauthorized(message),
            _ => PublishErrorKind::Status {
                status_code: status,
                message,
            },
        },
    };
    PublishError::new(kind)
}

/// Convert a decoded render payload into a preview, enforcing the
/// at-least-one-slide contract.
fn into_preview(story: &StoryId, data: PreviewData) -> RaconteurResult<PreviewResult> {
    if data.slides.is_empty() {
        return Err(RenderError::new(RenderErrorKind::NoSlides(story.to_string())).into());
    }

    let theme = data.theme.as_deref().and_then(|name| {
        let parsed = CarouselTheme::parse(name);
        if parsed.is_none() {
            warn!(theme = name, "Server declared an unknown carousel theme");
        }
        parsed
    });

    Ok(PreviewResult {
        slides: data
            .slides
            .into_iter()
            .map(|slide| SlideImage {
                url: slide.url,
                alt_text: slide.alt_text,
            })
            .collect(),
        caption: Caption::new(&data.caption)?,
        theme,
    })
}
