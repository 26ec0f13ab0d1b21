//! Actionable follow-ups derived from a health snapshot, shown alongside
//! the raw report so an operator doesn't have to interpret thresholds
//! themselves.

use serde::{Deserialize, Serialize};

use super::HealthStatus;
use super::reporter::HealthSnapshot;
use super::subsystem_checks::SubsystemChecker;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub subsystem: String,
    pub message: String,
    pub urgent: bool,
}

pub fn generate(snapshot: &HealthSnapshot) -> Vec<Recommendation> {
    SubsystemChecker::check_all(snapshot)
        .into_iter()
        .filter(|s| s.status != HealthStatus::Healthy)
        .map(|s| Recommendation {
            subsystem: s.name.clone(),
            message: s.message.unwrap_or_else(|| format!("{} needs attention", s.name)),
            urgent: s.status == HealthStatus::Unhealthy,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_snapshot_has_no_recommendations() {
        let snapshot = HealthSnapshot { max_query_latency_ms: 1000.0, max_database_size_bytes: 1, ..Default::default() };
        assert!(generate(&snapshot).is_empty());
    }

    #[test]
    fn degraded_subsystem_surfaces_as_recommendation() {
        let snapshot = HealthSnapshot {
            queue_depth: 2000,
            queue_warning_threshold: 1000,
            max_query_latency_ms: 1000.0,
            max_database_size_bytes: 1,
            ..Default::default()
        };
        let recs = generate(&snapshot);
        assert!(recs.iter().any(|r| r.subsystem == "change_queue" && r.urgent));
    }
}
