//! Umbrella error type. Every crate that can fail converts its own errors
//! into a variant here rather than exposing its internal error enum across
//! crate boundaries.

/// Top-level error for the Intelligence Retrieval Core.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    #[error("not initialized: {component}")]
    NotInitialized { component: String },

    #[error("database connection failed: {message}")]
    DatabaseConnection { message: String },

    #[error("index corruption detected: {details}")]
    IndexCorruption { details: String },

    #[error("content extraction failed for {path}: {reason}")]
    ContentExtraction { path: String, reason: String },

    #[error("concurrent update conflict on entry {entry_id}")]
    ConcurrentUpdateConflict { entry_id: String },

    #[error("hybrid fusion failed: {reason}")]
    HybridFusionFailed { reason: String },

    #[error("token budget exceeded: needed {needed} tokens, available {available}")]
    BudgetExceeded { needed: usize, available: usize },

    #[error("template render failed for {template_id}: {reason}")]
    TemplateRender { template_id: String, reason: String },

    #[error("operation timed out after {elapsed_ms}ms: {operation}")]
    Timeout { operation: String, elapsed_ms: u64 },

    #[error("configuration invalid: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IrError {
    /// Whether a caller may reasonably retry the operation that produced
    /// this error. Database-busy, connection, and timeout errors are
    /// transient; corruption and config errors are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IrError::DatabaseConnection { .. }
                | IrError::ConcurrentUpdateConflict { .. }
                | IrError::Timeout { .. }
                | IrError::Io(_)
        )
    }
}

pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_recoverable() {
        let err = IrError::Timeout { operation: "search".into(), elapsed_ms: 500 };
        assert!(err.is_recoverable());
    }

    #[test]
    fn corruption_is_not_recoverable() {
        let err = IrError::IndexCorruption { details: "bad page".into() };
        assert!(!err.is_recoverable());
    }
}
