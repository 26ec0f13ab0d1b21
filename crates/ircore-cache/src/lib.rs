//! # ircore-cache
//!
//! Context Pack Cache (§4.10): a hybrid hot (in-memory, `moka`-backed
//! LRU/TTL) and optional cold (on-disk) cache keyed on the
//! [`ircore_core::cache::CacheKey`] tuple.

pub mod cache;
pub mod cold;
pub mod transform;

pub use cache::{CacheStats, ContextPackCache};
pub use transform::{IdentityCodec, PackCodec};
