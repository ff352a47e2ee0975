//! Telemetry bootstrap for lensgram.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use lensgram_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the tracing/logging pipeline according to settings.
///
/// Honors `RUST_LOG` when set, defaulting to `info` otherwise.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|err| anyhow!("failed to initialize tracing subscriber: {err}"))?;

    tracing::debug!(
        target: "lensgram-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
