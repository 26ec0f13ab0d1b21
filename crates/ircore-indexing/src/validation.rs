//! Entry validation: required fields, body-length hard/soft
//! limits, and a soft warning (not a rejection) for paths that are
//! neither absolute nor drive-qualified.

use ircore_core::config::IndexingConfig;
use ircore_core::entry::Entry;
use ircore_core::errors::{IrError, IrResult};

/// Outcome of validating one [`Entry`]: it either passes (with zero or
/// more non-fatal warnings) or is rejected outright.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

/// Validate `entry` against `config`. Returns `Ok` with accumulated
/// warnings on success, or `Err(IrError::ContentExtraction)` if a hard
/// invariant is violated.
pub fn validate(entry: &Entry, config: &IndexingConfig) -> IrResult<ValidationReport> {
    let mut report = ValidationReport::default();

    if entry.id.is_empty() {
        return Err(reject(entry, "entry id must not be empty"));
    }
    if entry.title.is_empty() {
        return Err(reject(entry, "entry title must not be empty"));
    }
    if entry.body.is_empty() {
        return Err(reject(entry, "entry body must not be empty"));
    }
    if entry.path.is_empty() {
        return Err(reject(entry, "entry path must not be empty"));
    }

    let max = config.max_content_length;
    let soft_limit = (max as f64 * ircore_core::constants::SOFT_LIMIT_MULTIPLIER) as usize;
    let len = entry.body.len();
    if len > soft_limit {
        return Err(reject(
            entry,
            &format!("body length {len} exceeds soft limit {soft_limit} (1.5x max {max})"),
        ));
    }
    if len > max {
        report.warnings.push(format!("body length {len} exceeds max_content_length {max} (soft warn)"));
    }

    if !is_absolute_or_drive_qualified(&entry.path) {
        report.warnings.push(format!("path '{}' is neither absolute nor drive-qualified", entry.path));
    }

    Ok(report)
}

fn reject(entry: &Entry, reason: &str) -> IrError {
    IrError::ContentExtraction { path: entry.path.clone(), reason: reason.to_string() }
}

/// True for POSIX-absolute paths (`/...`) or Windows drive-qualified
/// paths (`C:\...`, `C:/...`).
fn is_absolute_or_drive_qualified(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && matches!(bytes[2], b'\\' | b'/')
}
