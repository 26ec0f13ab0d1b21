//! Wires a [`tracing_subscriber`] filter from [`ObservabilityConfig`],
//! mirroring the log-filter env-var convention (`RUST_LOG`-style
//! directives) the teacher's tracing setup uses.

use ircore_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber driven by `config.log_filter`.
/// Returns `Err` rather than panicking if a subscriber is already set, so
/// callers (tests, repeated `init()` calls) can ignore the failure.
pub fn init(config: &ObservabilityConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
}

pub mod events {
    //! Structured log helpers for well-known observability events, kept
    //! separate from ad-hoc `tracing::` call sites so field names stay
    //! consistent across callers.

    pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
        tracing::warn!(component, failure, fallback, "degradation triggered");
    }

    pub fn degradation_recovered(component: &str) {
        tracing::info!(component, "degradation recovered");
    }
}
