//! Maintenance loop decisions (ticked every 30 minutes by
//! `engine.rs`'s scheduler). Pure decision logic, kept separate from the
//! actual vacuum/optimize/cleanup I/O so it's trivial to test.

use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Point-in-time inputs the maintenance loop decides against.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceSnapshot {
    pub db_size_bytes: u64,
    pub max_db_size_bytes: u64,
    pub slow_queries_since_last_tick: u64,
    pub slow_query_threshold: u64,
    pub retention_days: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaintenanceActions {
    pub vacuum: bool,
    pub optimize: bool,
    pub cleanup_cutoff: Option<DateTime<Utc>>,
}

/// Decide which maintenance actions a tick should perform.
pub fn decide(snapshot: &MaintenanceSnapshot, now: DateTime<Utc>) -> MaintenanceActions {
    let vacuum = snapshot.max_db_size_bytes > 0
        && snapshot.db_size_bytes as f64 >= snapshot.max_db_size_bytes as f64 * 0.8;
    let optimize = snapshot.slow_queries_since_last_tick > snapshot.slow_query_threshold;
    let cleanup_cutoff =
        snapshot.retention_days.map(|days| now - ChronoDuration::days(days as i64));
    MaintenanceActions { vacuum, optimize, cleanup_cutoff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacuums_past_80_percent() {
        let snapshot = MaintenanceSnapshot {
            db_size_bytes: 81,
            max_db_size_bytes: 100,
            slow_queries_since_last_tick: 0,
            slow_query_threshold: 10,
            retention_days: None,
        };
        assert!(decide(&snapshot, Utc::now()).vacuum);
    }

    #[test]
    fn optimizes_past_slow_query_threshold() {
        let snapshot = MaintenanceSnapshot {
            db_size_bytes: 0,
            max_db_size_bytes: 100,
            slow_queries_since_last_tick: 11,
            slow_query_threshold: 10,
            retention_days: None,
        };
        assert!(decide(&snapshot, Utc::now()).optimize);
    }

    #[test]
    fn no_retention_means_no_cleanup() {
        let snapshot = MaintenanceSnapshot {
            db_size_bytes: 0,
            max_db_size_bytes: 100,
            slow_queries_since_last_tick: 0,
            slow_query_threshold: 10,
            retention_days: None,
        };
        assert!(decide(&snapshot, Utc::now()).cleanup_cutoff.is_none());
    }

    #[test]
    fn retention_produces_cutoff_in_the_past() {
        let snapshot = MaintenanceSnapshot {
            db_size_bytes: 0,
            max_db_size_bytes: 100,
            slow_queries_since_last_tick: 0,
            slow_query_threshold: 10,
            retention_days: Some(30),
        };
        let now = Utc::now();
        let cutoff = decide(&snapshot, now).cleanup_cutoff.unwrap();
        assert!(cutoff < now);
    }
}
