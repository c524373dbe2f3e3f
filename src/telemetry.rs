//! Logging setup and structured telemetry events.
//!
//! Diagnostics go through `tracing`. Refresh outcomes are additionally
//! reported as [`TelemetryEvent`]s so that embedders and tests can observe
//! each cycle without scraping log output.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global `tracing` subscriber.
///
/// Honours `RUST_LOG`; calling it more than once keeps the first subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _already_installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// A structured telemetry event emitted by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A refresh cycle finished and its snapshot was published.
    RefreshCompleted {
        /// Repositories present in the published snapshot, in order.
        published_repositories: Vec<String>,
        /// Repositories omitted because their issue listing failed.
        dropped_repositories: Vec<String>,
        /// Number of issues omitted because their enrichment failed.
        dropped_issues: usize,
        /// Wall-clock duration of the cycle in milliseconds.
        duration_ms: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Emits each event as a JSON field on an `info` log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        tracing::info!(telemetry = %serialised, "telemetry event");
    }
}
