//! Per-stage timing for one assembly run, and a pass/fail assessment
//! against the configured generation-time target (§4.11 "p95 latency
//! target: maxGenerationTimeMs").

/// Wall-clock duration, in milliseconds, spent in each pipeline stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyPerformanceMetrics {
    pub gather_ms: u64,
    pub prioritize_ms: u64,
    pub budget_ms: u64,
    pub assemble_ms: u64,
    pub render_ms: u64,
}

impl AssemblyPerformanceMetrics {
    pub fn total_ms(&self) -> u64 {
        self.gather_ms + self.prioritize_ms + self.budget_ms + self.assemble_ms + self.render_ms
    }
}

/// Assessment of one assembly run's latency against `max_generation_time_ms`.
#[derive(Debug, Clone)]
pub struct QualityAssessment {
    pub within_target: bool,
    pub total_ms: u64,
    pub issues: Vec<String>,
}

pub fn assess_quality(metrics: &AssemblyPerformanceMetrics, max_generation_time_ms: u64) -> QualityAssessment {
    let total_ms = metrics.total_ms();
    let within_target = total_ms <= max_generation_time_ms;
    let mut issues = Vec::new();
    if !within_target {
        issues.push(format!("assembly took {total_ms}ms, over the {max_generation_time_ms}ms target"));
    }
    QualityAssessment { within_target, total_ms, issues }
}
