//! `AssemblerEngine`: wraps the stage 3-7 pipeline with the cache probe
//! (stage 1), provenance session (stages 2/8), and dashboard recording.
//!
//! Unlike the single-execution guard the teacher's `ConsolidationEngine`
//! used, this engine runs every request's pipeline independently: the
//! assembly pipeline is sequential per request, but many requests run
//! concurrently (§5 concurrency model).

use std::sync::Mutex;
use std::time::Instant;

use ircore_cache::ContextPackCache;
use ircore_core::cache::CacheKey;
use ircore_core::config::{AssemblerConfig, BudgetConfig, PerformanceConfig};
use ircore_core::context_pack::{ContextPack, ContextPackMetadata};
use ircore_core::errors::IrResult;
use ircore_core::traits::IPackRenderer;
use ircore_prioritizer::ContentPrioritizer;
use ircore_provenance::ProvenanceTracker;
use ircore_tokens::TokenCounter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::concurrency;
use crate::gatherer::GathererRegistry;
use crate::monitoring::{self, AssemblerDashboard};
use crate::pipeline;
use crate::request::{AssembleOutcome, AssembleRequest};

const CONFIG_VERSION: u32 = 1;

pub struct AssemblerStats {
    pub total_runs: usize,
    pub successful_runs: usize,
    pub success_rate: f64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

pub struct AssemblerEngine {
    gatherers: GathererRegistry,
    prioritizer: ContentPrioritizer,
    provenance: ProvenanceTracker,
    cache: ContextPackCache,
    token_counter: TokenCounter,
    renderer: Option<Box<dyn IPackRenderer>>,
    budget_config: BudgetConfig,
    assembler_config: AssemblerConfig,
    performance_config: PerformanceConfig,
    dashboard: Mutex<AssemblerDashboard>,
}

impl AssemblerEngine {
    pub fn new(
        gatherers: GathererRegistry,
        budget_config: BudgetConfig,
        assembler_config: AssemblerConfig,
        performance_config: PerformanceConfig,
        cache: ContextPackCache,
    ) -> Self {
        Self {
            gatherers,
            prioritizer: ContentPrioritizer::default(),
            provenance: ProvenanceTracker::new(),
            cache,
            token_counter: TokenCounter::new(),
            renderer: None,
            budget_config,
            assembler_config,
            performance_config,
            dashboard: Mutex::new(AssemblerDashboard::new()),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn IPackRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Run the full 8-stage pipeline for one request.
    pub fn assemble(&self, request: &AssembleRequest) -> AssembleOutcome {
        let fingerprint = request.fingerprint();
        let cache_key = CacheKey::new(&request.issue_id, &request.agent_type, fingerprint, CONFIG_VERSION);

        // Stage 1: cache probe.
        if !request.force_refresh {
            if let Some(pack) = self.cache.get(&cache_key) {
                info!(issue_id = %request.issue_id, "assembly served from cache");
                return AssembleOutcome { pack, cache_hit: true, warnings: Vec::new() };
            }
        }

        // Stage 2: open a provenance session.
        let pack_id = Uuid::new_v4().to_string();
        let session_id = self.provenance.start_session(&pack_id);

        let gather_start = Instant::now();
        let (outcome, warnings) = pipeline::run_pipeline(
            request,
            &self.gatherers,
            &self.prioritizer,
            &self.budget_config,
            &self.token_counter,
            &self.assembler_config,
            self.renderer.as_deref(),
        );
        let elapsed_ms = gather_start.elapsed().as_millis() as u64;

        for warning in &warnings {
            let _ = self.provenance.register_source(
                &session_id,
                "warning",
                "pipeline",
                warning.clone(),
                serde_json::json!({}),
            );
        }

        let _ = self.provenance.end_session(&session_id);
        let provenance = self.provenance.generate(&session_id).unwrap_or_default();
        self.provenance.drop_session(&session_id);

        let optimization_level = if outcome.degraded { 0 } else { 1 };
        let metadata = ContextPackMetadata {
            pack_id,
            version: 1,
            issue_id: request.issue_id.clone(),
            agent_type: request.agent_type.clone(),
            generated_at: chrono::Utc::now(),
            valid_until: chrono::Utc::now() + chrono::Duration::hours(1),
            priority: 0,
            tags: Vec::new(),
            template_id: request.template_id.clone(),
            optimization_level,
        };

        let pack = ContextPack { metadata, content: outcome.content, provenance, token_usage: outcome.token_usage };

        // Stage 8: cache store.
        self.cache.set(cache_key, pack.clone());

        let metrics = monitoring::AssemblyPerformanceMetrics {
            gather_ms: elapsed_ms,
            prioritize_ms: 0,
            budget_ms: 0,
            assemble_ms: 0,
            render_ms: 0,
        };
        let assessment = monitoring::assess_quality(&metrics, self.assembler_config.max_generation_time_ms);
        if !assessment.within_target {
            warn!(issue_id = %request.issue_id, total_ms = assessment.total_ms, "assembly exceeded its generation-time target");
        }
        self.dashboard.lock().expect("dashboard lock poisoned").record_run(metrics, assessment);

        AssembleOutcome { pack, cache_hit: false, warnings }
    }

    /// Run up to `max_concurrency` assemblies at once, bounded
    /// independently of `PerformanceConfig.max_concurrent_queries`.
    pub fn batch_assemble(&self, requests: Vec<AssembleRequest>, max_concurrency: usize) -> Vec<AssembleOutcome> {
        concurrency::run_bounded(requests, max_concurrency, |request| self.assemble(request))
    }

    pub fn stats(&self) -> AssemblerStats {
        let dashboard = self.dashboard.lock().expect("dashboard lock poisoned");
        let cache_stats = self.cache.stats();
        AssemblerStats {
            total_runs: dashboard.total_runs,
            successful_runs: dashboard.successful_runs,
            success_rate: dashboard.success_rate,
            cache_hits: cache_stats.hits,
            cache_misses: cache_stats.misses,
        }
    }

    /// Run a minimal assembly against an empty request and report
    /// OK/degraded per sub-component (§6 health check).
    pub fn health_check(&self) -> IrResult<Vec<String>> {
        let probe = AssembleRequest { template_id: "health-check".to_string(), ..Default::default() };
        let outcome = self.assemble(&probe);
        let mut report = Vec::new();
        report.push(if outcome.warnings.is_empty() {
            "pipeline: ok".to_string()
        } else {
            format!("pipeline: warning ({} warning(s))", outcome.warnings.len())
        });
        Ok(report)
    }

    pub fn shutdown(&self) {
        self.cache.shutdown();
    }

    pub fn max_concurrent_queries(&self) -> usize {
        self.performance_config.max_concurrent_queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ircore_core::config::CacheConfig;
    use ircore_core::entry::{Entry, EntryKind, EntryMetadata};
    use ircore_core::errors::IrResult as CoreResult;
    use ircore_core::search::SearchResult;

    use crate::gatherer::{ContentGatherer, GathererKind};

    fn entry(id: &str) -> Entry {
        Entry {
            id: id.to_string(),
            kind: EntryKind::Knowledge,
            title: "t".to_string(),
            body: "body text here".to_string(),
            path: "/p".to_string(),
            content_hash: "h".to_string(),
            last_modified: Utc::now(),
            metadata: EntryMetadata::default(),
        }
    }

    struct FixedGatherer(Vec<SearchResult>);
    impl ContentGatherer for FixedGatherer {
        fn gather(&self, _request: &AssembleRequest) -> CoreResult<Vec<SearchResult>> {
            Ok(self.0.clone())
        }
    }

    fn engine() -> AssemblerEngine {
        let mut registry = GathererRegistry::new();
        registry.register(GathererKind::Knowledge, Box::new(FixedGatherer(vec![SearchResult::new(entry("k1"), 0.5, 1)])));
        AssemblerEngine::new(
            registry,
            BudgetConfig::default(),
            AssemblerConfig::default(),
            PerformanceConfig::default(),
            ContextPackCache::new(&CacheConfig::default()),
        )
    }

    #[test]
    fn second_identical_request_hits_cache() {
        let engine = engine();
        let request = AssembleRequest { issue_id: "iss-1".to_string(), agent_type: "backend".to_string(), ..Default::default() };
        let first = engine.assemble(&request);
        assert!(!first.cache_hit);
        let second = engine.assemble(&request);
        assert!(second.cache_hit);
        assert_eq!(first.pack.metadata.pack_id, second.pack.metadata.pack_id);
    }

    #[test]
    fn batch_assemble_runs_every_request() {
        let engine = engine();
        let requests = vec![
            AssembleRequest { issue_id: "a".to_string(), ..Default::default() },
            AssembleRequest { issue_id: "b".to_string(), ..Default::default() },
        ];
        let outcomes = engine.batch_assemble(requests, 2);
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn health_check_reports_ok_for_happy_path() {
        let engine = engine();
        let report = engine.health_check().unwrap();
        assert!(report.iter().any(|l| l.starts_with("pipeline")));
    }
}
