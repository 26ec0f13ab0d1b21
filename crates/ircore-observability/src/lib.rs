//! # ircore-observability
//!
//! Event stream dispatch, health reporting, degradation tracking, query
//! logging, and tracing setup for the intelligence retrieval core.

pub mod degradation;
pub mod engine;
pub mod event_sink;
pub mod health;
pub mod query_log;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use engine::ObservabilityEngine;
pub use event_sink::HandlerRegistry;
pub use health::{HealthMetrics, HealthReport, HealthReporter, HealthSnapshot, HealthStatus, Recommendation, SubsystemHealth};
pub use query_log::{QueryLog, QueryLogEntry};
