//! Wire format shared by the publishing endpoints.
//!
//! Every endpoint answers with the same envelope: `{success, data, error}`.
//! A declared `error.code` is the authoritative failure classification; the
//! HTTP status is consulted only when the server did not declare a code.
//! Error message text is display-only and never matched on.

use serde::Deserialize;

/// Error codes the server declares in failure envelopes.
pub mod codes {
    /// The platform refused the post because the account is over quota.
    pub const RATE_LIMITED: &str = "rate_limited";
    /// The platform rejected the account's credentials.
    pub const AUTH_FAILED: &str = "auth_failed";
    /// The story content could not be rendered into slides.
    pub const RENDER_FAILED: &str = "render_failed";
}

/// Response envelope around every endpoint's payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload, present on success
    pub data: Option<T>,
    /// Declared failure, present when `success` is false
    pub error: Option<ApiErrorBody>,
}

/// Failure payload inside an envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Machine-readable error code, see [`codes`]
    pub code: Option<String>,
    /// Human-readable message for display
    pub message: Option<String>,
    /// Seconds until the platform accepts another post, on rate limits
    pub retry_after_secs: Option<u64>,
}

impl ApiErrorBody {
    /// The declared message, or a placeholder when the server sent none.
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "no error message provided".to_string())
    }
}
