//! Logging for credcheck
//!
//! Diagnostic logs go to stderr through `tracing`, leaving stdout to the
//! operator-facing report.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "CREDCHECK_LOG";

/// Filter used when neither the caller nor the environment provides one
pub const DEFAULT_FILTER: &str = "warn";

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one event per line
    #[default]
    Text,
    /// Newline-delimited JSON
    Json,
}

/// Resolve the effective filter directive
///
/// An explicit directive wins, then `CREDCHECK_LOG`, then [`DEFAULT_FILTER`].
/// Invalid directives fall back to the default rather than failing startup.
pub fn build_filter(explicit: Option<&str>) -> EnvFilter {
    let directive = explicit
        .map(str::to_owned)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global `tracing` subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed
pub fn init(explicit_filter: Option<&str>, format: LogFormat) -> anyhow::Result<()> {
    let filter = build_filter(explicit_filter);

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            registry.with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            registry.with(fmt_layer).try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
