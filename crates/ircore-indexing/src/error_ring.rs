//! Bounded error history (maintenance loop: "compact error
//! history to ≤50 entries when it exceeds 100") shared by the queue
//! processor and the maintenance loop.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use ircore_core::constants::{ERROR_HISTORY_COMPACT_TO, MAX_ERROR_HISTORY};

#[derive(Debug, Clone)]
pub struct RecordedError {
    pub batch_id: String,
    pub message: String,
    pub recoverable: bool,
    pub at: DateTime<Utc>,
}

/// A ring that grows unbounded between maintenance ticks but is compacted
/// back down to `ERROR_HISTORY_COMPACT_TO` once it crosses
/// `MAX_ERROR_HISTORY`, keeping only the most recent entries.
pub struct ErrorRing {
    entries: Mutex<Vec<RecordedError>>,
}

impl ErrorRing {
    pub fn new() -> Self {
        Self { entries: Mutex::new(Vec::new()) }
    }

    pub fn record(&self, batch_id: impl Into<String>, message: impl Into<String>, recoverable: bool) {
        let mut entries = self.entries.lock().expect("error ring lock");
        entries.push(RecordedError {
            batch_id: batch_id.into(),
            message: message.into(),
            recoverable,
            at: Utc::now(),
        });
    }

    /// Drop the oldest entries once the ring exceeds `MAX_ERROR_HISTORY`,
    /// down to `ERROR_HISTORY_COMPACT_TO`. Called from the maintenance
    /// loop tick, not on every insert, matching 
    pub fn compact_if_needed(&self) {
        let mut entries = self.entries.lock().expect("error ring lock");
        if entries.len() > MAX_ERROR_HISTORY {
            let drop_count = entries.len() - ERROR_HISTORY_COMPACT_TO;
            entries.drain(0..drop_count);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("error ring lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<RecordedError> {
        self.entries.lock().expect("error ring lock").clone()
    }
}

impl Default for ErrorRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_once_past_max() {
        let ring = ErrorRing::new();
        for i in 0..150 {
            ring.record(format!("batch-{i}"), "busy", true);
        }
        assert_eq!(ring.len(), 150);
        ring.compact_if_needed();
        assert_eq!(ring.len(), ERROR_HISTORY_COMPACT_TO);
    }

    #[test]
    fn does_not_compact_under_max() {
        let ring = ErrorRing::new();
        for i in 0..50 {
            ring.record(format!("batch-{i}"), "busy", true);
        }
        ring.compact_if_needed();
        assert_eq!(ring.len(), 50);
    }
}
