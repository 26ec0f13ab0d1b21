//! System-wide constants. Per-component defaults live next to their config
//! struct in `config/`; these are the handful that are not configurable.

/// Crate version, surfaced in health reports and event payloads.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Soft-warn multiplier applied to `maxContentLength`: bodies between
/// `max` and `max * SOFT_LIMIT_MULTIPLIER` are accepted with a warning,
/// bodies beyond that are rejected as `ContentExtraction`.
pub const SOFT_LIMIT_MULTIPLIER: f64 = 1.5;

/// Width, in bytes, of the content-addressed ID (SHA-256 truncated per
/// REDESIGN FLAGS, expressed as hex — 16 bytes -> 32 hex chars).
pub const CONTENT_ID_BYTES: usize = 16;

/// Maximum number of errors retained in any bounded ring buffer (indexing
/// engine error history, degradation tracker, etc.).
pub const MAX_ERROR_HISTORY: usize = 100;

/// When an error history ring exceeds `MAX_ERROR_HISTORY`, it is compacted
/// down to this size.
pub const ERROR_HISTORY_COMPACT_TO: usize = 50;

/// Queue depth at which the indexing engine emits a `queue_warning` event.
pub const QUEUE_WARNING_THRESHOLD: usize = 1000;
