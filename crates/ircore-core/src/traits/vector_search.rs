use crate::errors::IrResult;

/// Optional vector-similarity port. The retrieval engine degrades to
/// lexical-only fusion when no implementation is registered — see
/// REDESIGN FLAGS (vector search is a pluggable slot, not a hard
/// dependency).
pub trait IVectorSearch: Send + Sync {
    fn search(&self, embedding: &[f32], limit: usize) -> IrResult<Vec<(String, f64)>>;
    fn is_available(&self) -> bool;
}
