//! Ties the event sink, degradation tracker, query log and health reporter
//! together behind one handle, the way the other engines expose a single
//! orchestrator type for their crate's public surface.

use std::sync::Mutex;
use std::time::Duration;

use ircore_core::config::ObservabilityConfig;
use ircore_core::events::Event;
use ircore_core::traits::IEventSink;

use crate::degradation::{DegradationEvent, DegradationTracker};
use crate::event_sink::{EventHandler, HandlerRegistry};
use crate::health::{HealthReport, HealthReporter, HealthSnapshot, Recommendation};
use crate::query_log::{QueryLog, QueryLogEntry};

pub struct ObservabilityEngine {
    config: ObservabilityConfig,
    sink: HandlerRegistry,
    degradation: Mutex<DegradationTracker>,
    query_log: Mutex<QueryLog>,
}

impl ObservabilityEngine {
    pub fn new(config: ObservabilityConfig) -> Self {
        Self {
            config,
            sink: HandlerRegistry::new(),
            degradation: Mutex::new(DegradationTracker::new()),
            query_log: Mutex::new(QueryLog::new()),
        }
    }

    pub fn register_handler(&mut self, handler: EventHandler) {
        self.sink.register(handler);
    }

    pub fn emit(&self, event: Event) {
        if let Event::QueueWarning { depth, .. } = &event {
            if *depth >= self.config.queue_warning_threshold {
                tracing::warn!(depth, threshold = self.config.queue_warning_threshold, "queue depth warning");
            }
        }
        self.sink.emit(event);
    }

    pub fn record_degradation(&self, event: DegradationEvent) {
        self.emit(Event::HealthWarning { component: event.component.clone(), detail: event.failure.clone() });
        self.degradation.lock().unwrap().record(event);
    }

    pub fn mark_recovered(&self, component: &str) {
        self.degradation.lock().unwrap().mark_recovered(component);
    }

    pub fn active_degradations(&self) -> usize {
        self.degradation.lock().unwrap().active_count()
    }

    pub fn record_query(
        &self,
        query: impl Into<String>,
        strategy: Option<String>,
        latency: Duration,
        result_count: usize,
        token_budget: usize,
        tokens_used: usize,
        cache_hits: usize,
    ) {
        let entry = QueryLogEntry::new(query, strategy, latency, result_count, token_budget, tokens_used, cache_hits);
        self.query_log.lock().unwrap().record(entry);
    }

    pub fn avg_query_latency(&self) -> Duration {
        self.query_log.lock().unwrap().avg_latency()
    }

    pub fn health_report(&self, mut snapshot: HealthSnapshot) -> HealthReport {
        snapshot.active_degradations = self.active_degradations();
        snapshot.queue_warning_threshold = self.config.queue_warning_threshold;
        if snapshot.avg_query_latency_ms == 0.0 {
            snapshot.avg_query_latency_ms = self.avg_query_latency().as_secs_f64() * 1000.0;
        }
        HealthReporter::build(&snapshot)
    }

    pub fn recommendations(&self, snapshot: &HealthSnapshot) -> Vec<Recommendation> {
        HealthReporter::recommendations(snapshot)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.config.health_check_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_warning_over_threshold_emits_warning_log() {
        let engine = ObservabilityEngine::new(ObservabilityConfig { queue_warning_threshold: 10, ..Default::default() });
        engine.emit(Event::QueueWarning { depth: 20, threshold: 10 });
    }

    #[test]
    fn degradation_feeds_into_health_report() {
        let engine = ObservabilityEngine::new(ObservabilityConfig::default());
        engine.record_degradation(DegradationEvent::new("vector_search", "timeout", "fts_only"));
        let report = engine.health_report(HealthSnapshot { max_database_size_bytes: 1, ..Default::default() });
        assert_eq!(report.overall_status, crate::health::HealthStatus::Degraded);
    }

    #[test]
    fn query_log_feeds_average_latency() {
        let engine = ObservabilityEngine::new(ObservabilityConfig::default());
        engine.record_query("q", Some("hybrid".to_string()), Duration::from_millis(50), 3, 2000, 1000, 1);
        assert!(engine.avg_query_latency() > Duration::ZERO);
    }
}
