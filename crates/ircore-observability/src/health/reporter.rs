//! Aggregate health report generation, run on a minimal health-check
//! assembly per §6 ("runs a minimal assembly and reports OK/warning/error
//! per sub-component").

use super::{HealthMetrics, HealthReport, HealthStatus, SubsystemHealth};
use super::recommendations::{self, Recommendation};
use super::subsystem_checks::SubsystemChecker;

/// Snapshot of subsystem data a caller assembles before asking for a
/// report; kept separate from the engines themselves so this crate
/// doesn't need to depend on `ircore-storage`/`ircore-retrieval`/etc.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    pub total_entries: usize,
    pub stale_entries: usize,
    pub queue_depth: usize,
    pub queue_warning_threshold: usize,
    pub cache_hit_rate: f64,
    pub avg_query_latency_ms: f64,
    pub max_query_latency_ms: f64,
    pub database_size_bytes: u64,
    pub max_database_size_bytes: u64,
    pub vector_search_available: bool,
    pub active_degradations: usize,
}

pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let subsystems = SubsystemChecker::check_all(snapshot);
        let overall_status = Self::derive_overall(&subsystems);

        HealthReport {
            overall_status,
            subsystems,
            metrics: HealthMetrics {
                total_entries: snapshot.total_entries,
                stale_entries: snapshot.stale_entries,
                queue_depth: snapshot.queue_depth,
                cache_hit_rate: snapshot.cache_hit_rate,
                avg_query_latency_ms: snapshot.avg_query_latency_ms,
                database_size_bytes: snapshot.database_size_bytes,
            },
        }
    }

    pub fn recommendations(snapshot: &HealthSnapshot) -> Vec<Recommendation> {
        recommendations::generate(snapshot)
    }

    /// Unhealthy if any subsystem is unhealthy, degraded if any is
    /// degraded, otherwise healthy.
    fn derive_overall(subsystems: &[SubsystemHealth]) -> HealthStatus {
        let mut worst = HealthStatus::Healthy;
        for s in subsystems {
            match s.status {
                HealthStatus::Unhealthy => return HealthStatus::Unhealthy,
                HealthStatus::Degraded => worst = HealthStatus::Degraded,
                HealthStatus::Healthy => {}
            }
        }
        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_snapshot_yields_healthy_overall() {
        let snapshot = HealthSnapshot {
            cache_hit_rate: 0.9,
            vector_search_available: true,
            queue_warning_threshold: 1000,
            max_database_size_bytes: 10_000_000,
            max_query_latency_ms: 1000.0,
            ..Default::default()
        };
        let report = HealthReporter::build(&snapshot);
        assert_eq!(report.overall_status, HealthStatus::Healthy);
    }

    #[test]
    fn overloaded_queue_degrades_overall() {
        let snapshot = HealthSnapshot {
            queue_depth: 2000,
            queue_warning_threshold: 1000,
            max_query_latency_ms: 1000.0,
            max_database_size_bytes: 10_000_000,
            ..Default::default()
        };
        let report = HealthReporter::build(&snapshot);
        assert_ne!(report.overall_status, HealthStatus::Healthy);
    }
}
