//! Settings gate with a short-lived read cache.

use crate::{ApiConfig, GateConfig};
use async_trait::async_trait;
use raconteur_error::{RaconteurResult, SettingsError};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// The settings document as the server publishes it.
#[derive(Debug, Clone, Deserialize)]
struct SettingsDoc {
    #[serde(rename = "publishing.enabled")]
    publishing_enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
struct CachedRead {
    enabled: bool,
    fetched_at: Instant,
}

/// Gate over the remote `publishing.enabled` setting.
///
/// Reads the settings document at most once per TTL window. When the read
/// itself fails the configured fail-open policy decides the answer: open
/// attempts publishing rather than silently dropping it, closed skips the
/// run. Failed reads are never cached, so the next check retries.
///
/// # Examples
///
/// ```no_run
/// use raconteur_client::{RaconteurConfig, SettingsGate};
/// use raconteur_interface::PublishingGate;
///
/// # async fn check() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RaconteurConfig::load()?;
/// let gate = SettingsGate::new(config.api(), config.gate())?;
/// if gate.publishing_enabled().await {
///     println!("publishing is on");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsGate {
    client: Client,
    url: String,
    ttl: Duration,
    fail_open: bool,
    cached: Arc<RwLock<Option<CachedRead>>>,
}

impl SettingsGate {
    /// Create a new settings gate.
    #[instrument(skip(api, gate), fields(base_url = %api.base_url(), fail_open = gate.fail_open()))]
    pub fn new(api: &ApiConfig, gate: &GateConfig) -> RaconteurResult<Self> {
        debug!("Creating settings gate");
        let client = Client::builder()
            .timeout(Duration::from_secs(*api.request_timeout_secs()))
            .build()
            .map_err(|e| SettingsError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: format!(
                "{}/{}",
                api.base_url().trim_end_matches('/'),
                gate.settings_path().trim_start_matches('/')
            ),
            ttl: Duration::from_secs(*gate.cache_ttl_secs()),
            fail_open: *gate.fail_open(),
            cached: Arc::new(RwLock::new(None)),
        })
    }

    /// Fetch and decode the settings document.
    async fn read_settings(&self) -> RaconteurResult<bool> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SettingsError::new(format!("Settings request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                SettingsError::new(format!("Settings read returned HTTP {}", status)).into(),
            );
        }

        let doc: SettingsDoc = response
            .json()
            .await
            .map_err(|e| SettingsError::new(format!("Failed to decode settings: {}", e)))?;

        doc.publishing_enabled.ok_or_else(|| {
            SettingsError::new("Settings document is missing publishing.enabled").into()
        })
    }
}

#[async_trait]
impl raconteur_interface::PublishingGate for SettingsGate {
    #[instrument(skip(self))]
    async fn publishing_enabled(&self) -> bool {
        if let Some(cached) = *self.cached.read().await {
            if cached.fetched_at.elapsed() <= self.ttl {
                debug!(enabled = cached.enabled, "Using cached settings read");
                return cached.enabled;
            }
        }

        match self.read_settings().await {
            Ok(enabled) => {
                *self.cached.write().await = Some(CachedRead {
                    enabled,
                    fetched_at: Instant::now(),
                });
                debug!(enabled, "Fetched publishing settings");
                enabled
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fail_open = self.fail_open,
                    "Settings read failed, applying fail-open policy"
                );
                self.fail_open
            }
        }
    }
}
