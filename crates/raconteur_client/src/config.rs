//! Configuration structures for the publishing client.
//!
//! This module provides TOML-based configuration. The configuration system
//! supports:
//! - Bundled defaults (include_str! from raconteur.toml)
//! - User overrides (./raconteur.toml or ~/.config/raconteur/raconteur.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use raconteur_cache::PreviewCacheConfig;
use raconteur_error::{ConfigError, RaconteurError, RaconteurResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Endpoint configuration for the publishing API.
///
/// # Example
///
/// ```toml
/// [api]
/// base_url = "https://backstage.example.com/api"
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, derive_getters::Getters)]
pub struct ApiConfig {
    /// Base URL for the publish and settings endpoints
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8787/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Settings gate configuration.
///
/// `fail_open` decides what the gate reports when the settings read itself
/// fails: `true` attempts publishing anyway, `false` skips the run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, derive_getters::Getters)]
pub struct GateConfig {
    /// Path of the settings document relative to the API base URL
    #[serde(default = "default_settings_path")]
    settings_path: String,

    /// How long a fetched settings document stays fresh, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,

    /// Whether a failed settings read counts as publishing enabled
    #[serde(default = "default_fail_open")]
    fail_open: bool,
}

fn default_settings_path() -> String {
    "settings".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_fail_open() -> bool {
    true
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fail_open: default_fail_open(),
        }
    }
}

/// Workflow timing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, derive_getters::Getters)]
pub struct WorkflowConfig {
    /// Hard deadline for the post-publish handle prompt, in seconds
    #[serde(default = "default_handle_deadline_secs")]
    handle_deadline_secs: u64,

    /// Capacity of the progress broadcast channel
    #[serde(default = "default_progress_capacity")]
    progress_capacity: usize,
}

fn default_handle_deadline_secs() -> u64 {
    30
}

fn default_progress_capacity() -> usize {
    16
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            handle_deadline_secs: default_handle_deadline_secs(),
            progress_capacity: default_progress_capacity(),
        }
    }
}

/// Top-level raconteur configuration.
///
/// Loads from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from raconteur.toml)
/// 2. User override (~/.config/raconteur/raconteur.toml)
/// 3. User override (./raconteur.toml, highest precedence)
///
/// # Example
///
/// ```no_run
/// use raconteur_client::RaconteurConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RaconteurConfig::load()?;
/// println!("Publishing against {}", config.api().base_url());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Deserialize, Serialize, derive_getters::Getters,
)]
pub struct RaconteurConfig {
    /// Endpoint configuration
    #[serde(default)]
    api: ApiConfig,

    /// Settings gate configuration
    #[serde(default)]
    gate: GateConfig,

    /// Workflow timing configuration
    #[serde(default)]
    workflow: WorkflowConfig,

    /// Preview cache configuration
    #[serde(default)]
    cache: PreviewCacheConfig,
}

impl RaconteurConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RaconteurResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                RaconteurError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                RaconteurError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (raconteur.toml shipped with the library)
    /// 2. User config in home directory (~/.config/raconteur/raconteur.toml)
    /// 3. User config in current directory (./raconteur.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> RaconteurResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../raconteur.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/raconteur/raconteur.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("raconteur").required(false));

        builder
            .build()
            .map_err(|e| {
                RaconteurError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                RaconteurError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: RaconteurConfig = toml_from_str("");
        assert_eq!(config.gate().cache_ttl_secs(), &30);
        assert!(*config.gate().fail_open());
        assert_eq!(config.workflow().handle_deadline_secs(), &30);
    }

    #[test]
    fn empty_config_equals_a_default_constructed_one() {
        let config: RaconteurConfig = toml_from_str("");
        assert_eq!(config, RaconteurConfig::default());
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config: RaconteurConfig = toml_from_str(
            r#"
            [gate]
            fail_open = false
            "#,
        );
        assert!(!*config.gate().fail_open());
        assert_eq!(config.gate().settings_path(), "settings");
    }

    #[test]
    fn bundled_defaults_parse() {
        let bundled = include_str!("../../../raconteur.toml");
        let config: RaconteurConfig = toml_from_str(bundled);
        assert_eq!(config.workflow().handle_deadline_secs(), &30);
        assert_eq!(config.api().request_timeout_secs(), &30);
    }

    fn toml_from_str(raw: &str) -> RaconteurConfig {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
