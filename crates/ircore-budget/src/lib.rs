//! # ircore-budget
//!
//! Enforcement half of the Token Budgeter. Counting lives
//! in `ircore-tokens`; this crate runs the compress -> eliminate ->
//! truncate escalation over a prioritized [`Section`] list until the pack
//! fits `budget`, or gives up and emits a `budget_exceeded` warning while
//! still returning the best-effort result.

pub mod compression;
pub mod elimination;
pub mod enforcer;
pub mod truncation;

pub use enforcer::{BudgetEnforcer, EnforcementOutcome};
