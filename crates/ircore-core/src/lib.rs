//! # ircore-core
//!
//! Foundation crate for the Intelligence Retrieval Core.
//! Defines the data model (§3), cross-crate ports (traits), the error
//! taxonomy (§7), the event stream contract, and every enumerated
//! configuration option (§6). Every other crate in the workspace depends
//! on this one, and this one depends on nothing internal.

pub mod bandit;
pub mod cache;
pub mod confidence;
pub mod config;
pub mod constants;
pub mod context_pack;
pub mod entry;
pub mod errors;
pub mod events;
pub mod features;
pub mod provenance;
pub mod relationships;
pub mod search;
pub mod section;
pub mod traits;

pub use confidence::Confidence;
pub use config::IntelligenceCoreConfig;
pub use entry::{Entry, EntryKind, EntryMetadata};
pub use errors::{IrError, IrResult};
pub use events::Event;
pub use search::SearchResult;
