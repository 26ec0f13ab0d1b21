//! # ircore-storage
//!
//! SQLite FTS5-backed persistence for the Intelligence Retrieval Core.
//! One writer connection, a round-robin pool of read-only connections,
//! and a schema kept in sync with an FTS5 shadow index via triggers.

pub mod engine;
pub mod errors;
pub mod pool;
pub mod queries;
pub mod schema;

pub use engine::StorageEngine;
