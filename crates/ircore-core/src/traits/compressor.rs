use crate::errors::IrResult;

/// Content-compression port used by the prioritizer/budgeter to shrink a
/// single entry's body by one level (L0 full text -> Ln summary) without
/// those crates depending on a concrete summarization implementation.
pub trait IContentCompressor: Send + Sync {
    /// Compress `body` to approximately `target_level` (0 = uncompressed,
    /// increasing levels drop more detail). Returns the compressed body
    /// and the level actually achieved, which may be coarser than
    /// requested if a finer level isn't available.
    fn compress(&self, body: &str, target_level: u8) -> IrResult<(String, u8)>;

    fn max_level(&self) -> u8;
}
