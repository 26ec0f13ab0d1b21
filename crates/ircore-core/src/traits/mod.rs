//! Interface-segregated ports that break cyclic dependencies between
//! crates: each downstream crate depends on a narrow trait defined here
//! rather than on the crate that implements it.

pub mod compressor;
pub mod event_sink;
pub mod renderer;
pub mod storage;
pub mod vector_search;

pub use compressor::IContentCompressor;
pub use event_sink::{IEventSink, NullEventSink};
pub use renderer::IPackRenderer;
pub use storage::IEntryStorage;
pub use vector_search::IVectorSearch;
