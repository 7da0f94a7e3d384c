//! Console telemetry initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize console-only telemetry.
///
/// Reads any `.env` file first so a `RUST_LOG` set there is honored, then
/// installs a formatted console subscriber. Without `RUST_LOG` the filter
/// defaults to `info` globally and `debug` for this crate.
///
/// Call once at startup, before any workflow runs.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,raconteur=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
