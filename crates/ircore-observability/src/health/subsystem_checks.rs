//! Threshold-based per-subsystem checks, grounded on the teacher's
//! `check_storage`/`check_embeddings`/`check_causal`/`check_privacy` style:
//! each check is a pure function from snapshot data to a status + message.

use super::reporter::HealthSnapshot;
use super::{HealthStatus, SubsystemHealth};

pub struct SubsystemChecker;

impl SubsystemChecker {
    pub fn check_all(snapshot: &HealthSnapshot) -> Vec<SubsystemHealth> {
        vec![
            Self::check_index(snapshot),
            Self::check_queue(snapshot),
            Self::check_cache(snapshot),
            Self::check_vector_search(snapshot),
            Self::check_database(snapshot),
            Self::check_degradations(snapshot),
        ]
    }

    fn check_index(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let stale_ratio = if snapshot.total_entries == 0 {
            0.0
        } else {
            snapshot.stale_entries as f64 / snapshot.total_entries as f64
        };
        let (status, message) = if stale_ratio > 0.5 {
            (HealthStatus::Unhealthy, Some(format!("{:.0}% of entries stale", stale_ratio * 100.0)))
        } else if stale_ratio > 0.1 {
            (HealthStatus::Degraded, Some(format!("{:.0}% of entries stale", stale_ratio * 100.0)))
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth { name: "index".to_string(), status, message }
    }

    fn check_queue(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.queue_warning_threshold == 0 {
            (HealthStatus::Healthy, None)
        } else if snapshot.queue_depth >= snapshot.queue_warning_threshold * 2 {
            (HealthStatus::Unhealthy, Some(format!("queue depth {} far above threshold", snapshot.queue_depth)))
        } else if snapshot.queue_depth >= snapshot.queue_warning_threshold {
            (HealthStatus::Degraded, Some(format!("queue depth {} at or above threshold", snapshot.queue_depth)))
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth { name: "change_queue".to_string(), status, message }
    }

    fn check_cache(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.cache_hit_rate < 0.2 {
            (HealthStatus::Degraded, Some(format!("hit rate {:.2} is low", snapshot.cache_hit_rate)))
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth { name: "context_pack_cache".to_string(), status, message }
    }

    fn check_vector_search(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.vector_search_available {
            (HealthStatus::Healthy, None)
        } else {
            (HealthStatus::Degraded, Some("vector search unavailable, falling back to FTS-only".to_string()))
        };
        SubsystemHealth { name: "vector_search".to_string(), status, message }
    }

    fn check_database(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.max_database_size_bytes > 0
            && snapshot.database_size_bytes >= snapshot.max_database_size_bytes
        {
            (HealthStatus::Degraded, Some("database size at configured limit".to_string()))
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth { name: "database".to_string(), status, message }
    }

    fn check_degradations(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.active_degradations == 0 {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Degraded,
                Some(format!("{} active degradation(s)", snapshot.active_degradations)),
            )
        };
        SubsystemHealth { name: "degradation_tracker".to_string(), status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_index_is_unhealthy_past_half() {
        let snapshot = HealthSnapshot { total_entries: 10, stale_entries: 6, ..Default::default() };
        let h = SubsystemChecker::check_index(&snapshot);
        assert_eq!(h.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn empty_index_is_healthy() {
        let snapshot = HealthSnapshot::default();
        let h = SubsystemChecker::check_index(&snapshot);
        assert_eq!(h.status, HealthStatus::Healthy);
    }

    #[test]
    fn missing_vector_search_degrades_not_fails() {
        let snapshot = HealthSnapshot { vector_search_available: false, ..Default::default() };
        let h = SubsystemChecker::check_vector_search(&snapshot);
        assert_eq!(h.status, HealthStatus::Degraded);
    }
}
