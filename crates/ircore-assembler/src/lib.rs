//! # ircore-assembler
//!
//! Context Pack Assembler (§4.11): an 8-stage pipeline — cache probe,
//! provenance session, parallel gathering, prioritization, budget
//! enforcement, assembly, rendering, provenance/cache close-out — that
//! turns a query plus an agent type into a budget-fitted [`ContextPack`].
//!
//! Gatherer absence or failure downgrades to a warning rather than
//! aborting the assembly; a non-gatherer stage failure (only the render
//! stage today) downgrades the pack's `optimization_level` to 0 instead
//! of failing the request.
//!
//! [`ContextPack`]: ircore_core::context_pack::ContextPack

pub mod algorithms;
pub mod concurrency;
pub mod engine;
pub mod gatherer;
pub mod monitoring;
pub mod pipeline;
pub mod request;

pub use engine::{AssemblerEngine, AssemblerStats};
pub use gatherer::{ContentGatherer, GathererKind, GathererRegistry, GatheringOutcome};
pub use monitoring::{AssemblerDashboard, AssemblyPerformanceMetrics};
pub use request::{AssembleOutcome, AssembleRequest};
