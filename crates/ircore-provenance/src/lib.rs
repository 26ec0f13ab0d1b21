//! # ircore-provenance
//!
//! Session-scoped Provenance Tracker (§4.9): registers sources and
//! decisions as an assembly runs, then folds them into the
//! [`ircore_core::provenance::ProvenanceInfo`] attached to the finished
//! Context Pack.

pub mod source;
pub mod tracker;
pub mod warnings;

pub use source::SourceRegistration;
pub use tracker::ProvenanceTracker;
