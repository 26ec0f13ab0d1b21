//! Assembly performance monitoring: per-stage timings and a dashboard.

pub mod dashboard;
pub mod metrics;

pub use dashboard::AssemblerDashboard;
pub use metrics::{AssemblyPerformanceMetrics, QualityAssessment, assess_quality};
