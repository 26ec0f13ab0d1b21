use ircore_core::errors::IrError;

/// Convert a rusqlite error into the umbrella error type. Busy/locked
/// conditions are mapped to `DatabaseConnection` so `is_recoverable`
/// reports them as retryable; anything else becomes `IndexCorruption`,
/// which callers should treat as reason to trigger a rebuild.
pub fn to_ir_err(err: rusqlite::Error) -> IrError {
    match &err {
        rusqlite::Error::SqliteFailure(ffi_err, _)
            if matches!(
                ffi_err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            IrError::DatabaseConnection { message: err.to_string() }
        }
        _ => IrError::IndexCorruption { details: err.to_string() },
    }
}
