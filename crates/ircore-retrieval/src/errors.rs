use ircore_core::errors::IrError;

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("fusion failed: {reason}")]
    FusionFailed { reason: String },

    #[error("all candidate lists empty or errored")]
    NoCandidates,

    #[error("retrieval method {method} timed out after {elapsed_ms}ms")]
    MethodTimeout { method: String, elapsed_ms: u64 },

    #[error(transparent)]
    Storage(#[from] IrError),
}

impl From<RetrievalError> for IrError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::FusionFailed { reason } => IrError::HybridFusionFailed { reason },
            RetrievalError::NoCandidates => {
                IrError::HybridFusionFailed { reason: "no candidates from any retrieval method".into() }
            }
            RetrievalError::MethodTimeout { method, elapsed_ms } => {
                IrError::Timeout { operation: method, elapsed_ms }
            }
            RetrievalError::Storage(e) => e,
        }
    }
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
