//! Pluggable seams for the cache's optional compression/encryption
//! toggles (§4.10 configuration). No general-purpose compression or
//! crypto crate is part of this stack, so both default to a lossless
//! identity transform; a deployment that needs real compression or
//! encryption supplies its own [`PackCodec`] impl.

/// Reversible byte transform applied to cold-tier payloads. Must be
/// lossless: `decode(encode(bytes)) == bytes` is the cache's
/// byte-identical-within-TTL invariant's only real requirement.
pub trait PackCodec: Send + Sync {
    fn encode(&self, bytes: Vec<u8>) -> Vec<u8>;
    fn decode(&self, bytes: Vec<u8>) -> Vec<u8>;
}

/// No-op codec, the default for both `compression` and `encryption`.
pub struct IdentityCodec;

impl PackCodec for IdentityCodec {
    fn encode(&self, bytes: Vec<u8>) -> Vec<u8> {
        bytes
    }

    fn decode(&self, bytes: Vec<u8>) -> Vec<u8> {
        bytes
    }
}
