//! Surfaces assembler health through observability: run counts, success
//! rate, and the latest timing breakdown.

use super::metrics::{AssemblyPerformanceMetrics, QualityAssessment};

#[derive(Debug, Clone)]
pub struct AssemblerDashboard {
    pub total_runs: usize,
    pub successful_runs: usize,
    pub latest_metrics: Option<AssemblyPerformanceMetrics>,
    pub latest_assessment: Option<QualityAssessment>,
    pub success_rate: f64,
}

impl AssemblerDashboard {
    pub fn new() -> Self {
        Self {
            total_runs: 0,
            successful_runs: 0,
            latest_metrics: None,
            latest_assessment: None,
            success_rate: 0.0,
        }
    }

    pub fn record_run(&mut self, metrics: AssemblyPerformanceMetrics, assessment: QualityAssessment) {
        self.total_runs += 1;
        if assessment.within_target {
            self.successful_runs += 1;
        }
        self.success_rate = if self.total_runs > 0 { self.successful_runs as f64 / self.total_runs as f64 } else { 0.0 };
        self.latest_metrics = Some(metrics);
        self.latest_assessment = Some(assessment);
    }
}

impl Default for AssemblerDashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_runs() {
        let mut dash = AssemblerDashboard::new();
        assert_eq!(dash.total_runs, 0);

        dash.record_run(
            AssemblyPerformanceMetrics { gather_ms: 1, prioritize_ms: 1, budget_ms: 1, assemble_ms: 1, render_ms: 1 },
            QualityAssessment { within_target: true, total_ms: 5, issues: vec![] },
        );

        assert_eq!(dash.total_runs, 1);
        assert_eq!(dash.successful_runs, 1);
        assert!((dash.success_rate - 1.0).abs() < f64::EPSILON);
    }
}
