//! Logging bootstrap for host shells.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG`, defaulting to `info`. Call once at process start;
/// a second call fails because a subscriber is already installed.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    Ok(())
}
