//! Typed event stream emitted by the Indexing Engine and the rest of the
//! system, consumed by `ircore-observability`'s handler registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Initialized { at: DateTime<Utc> },
    Shutdown { at: DateTime<Utc> },
    BatchProcessed { count: usize, duration_ms: u64 },
    ContentIndexed { entry_id: String, path: String },
    RebuildStarted,
    RebuildCompleted { duration_ms: u64 },
    RebuildError { reason: String },
    VacuumStarted,
    VacuumCompleted { duration_ms: u64, bytes_reclaimed: u64 },
    VacuumError { reason: String },
    QueueWarning { depth: usize, threshold: usize },
    HealthWarning { component: String, detail: String },
    HealthCritical { component: String, detail: String },
    ContentChangeError { path: String, reason: String },
    ChangeBufferProcessed { count: usize },
}

impl Event {
    /// Stable name used for log targets and metric labels, independent of
    /// the serde tag so renaming a variant's payload doesn't change it.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Initialized { .. } => "initialized",
            Event::Shutdown { .. } => "shutdown",
            Event::BatchProcessed { .. } => "batch_processed",
            Event::ContentIndexed { .. } => "content_indexed",
            Event::RebuildStarted => "rebuild_started",
            Event::RebuildCompleted { .. } => "rebuild_completed",
            Event::RebuildError { .. } => "rebuild_error",
            Event::VacuumStarted => "vacuum_started",
            Event::VacuumCompleted { .. } => "vacuum_completed",
            Event::VacuumError { .. } => "vacuum_error",
            Event::QueueWarning { .. } => "queue_warning",
            Event::HealthWarning { .. } => "health_warning",
            Event::HealthCritical { .. } => "health_critical",
            Event::ContentChangeError { .. } => "content_change_error",
            Event::ChangeBufferProcessed { .. } => "change_buffer_processed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_stable_across_payload() {
        let e1 = Event::QueueWarning { depth: 1, threshold: 1000 };
        let e2 = Event::QueueWarning { depth: 999, threshold: 1000 };
        assert_eq!(e1.name(), e2.name());
    }
}
