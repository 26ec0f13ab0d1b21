//! Record every degradation event: component, failure mode, fallback used,
//! timestamp, recovery status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(component: impl Into<String>, failure: impl Into<String>, fallback_used: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Tracks all degradation events for alerting and reporting, e.g. vector
/// search falling back to FTS-only, or the bandit selector falling back to
/// a fixed strategy after repeated errors.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        self.events.push(TrackedDegradation { event, recovery_status: RecoveryStatus::Active, recovered_at: None });
    }

    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        for tracked in self.events.iter_mut().rev() {
            if tracked.event.component == component && tracked.recovery_status == RecoveryStatus::Active {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                crate::tracing_setup::events::degradation_recovered(component);
                break;
            }
        }
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events.iter().filter(|t| t.recovery_status == RecoveryStatus::Active).collect()
    }

    pub fn active_count(&self) -> usize {
        self.active_degradations().len()
    }

    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events.iter().filter(|t| t.event.component == component && t.event.timestamp > cutoff).count()
    }

    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_recover_flips_status() {
        let mut tracker = DegradationTracker::new();
        tracker.record(DegradationEvent::new("vector_search", "timeout", "fts_only"));
        assert_eq!(tracker.active_count(), 1);
        tracker.mark_recovered("vector_search");
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn recover_is_noop_for_unknown_component() {
        let mut tracker = DegradationTracker::new();
        tracker.mark_recovered("nothing");
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn count_recent_ignores_stale_events() {
        let mut tracker = DegradationTracker::new();
        tracker.record(DegradationEvent::new("bandit", "error", "fixed_strategy"));
        assert_eq!(tracker.count_recent("bandit", 60), 1);
        assert_eq!(tracker.count_recent("bandit", -1), 0);
    }
}
