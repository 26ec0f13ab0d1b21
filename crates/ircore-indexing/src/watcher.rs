//! File-watcher protocol: maps raw `notify` filesystem events
//! into [`ContentChange`] records dispatched through
//! [`crate::engine::IndexingEngine::handle_content_change`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ircore_core::entry::EntryKind;
use ircore_core::config::IndexingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

/// One filesystem event, normalized from whatever `notify` reported.
#[derive(Debug, Clone)]
pub struct ContentChange {
    pub kind: ChangeKind,
    pub path: PathBuf,
    pub content_kind: EntryKind,
    pub timestamp: DateTime<Utc>,
}

impl ContentChange {
    pub fn new(kind: ChangeKind, path: PathBuf) -> Self {
        let content_kind = infer_entry_kind(&path);
        Self { kind, path, content_kind, timestamp: Utc::now() }
    }
}

/// Infer an [`EntryKind`] from a path's extension/location. Falls back to
/// `Code` for anything unrecognized rather than rejecting it; validation
/// downstream still applies the extension allow-list.
pub fn infer_entry_kind(path: &Path) -> EntryKind {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    match ext.as_str() {
        "toml" | "yaml" | "yml" | "ini" | "env" => EntryKind::Config,
        "md" | "mdx" if stem.starts_with("decision") || stem.contains("adr") => EntryKind::DecisionRecord,
        "md" | "mdx" | "txt" if stem.contains("pitfall") || stem.contains("gotcha") => EntryKind::Pitfall,
        "md" | "mdx" | "txt" if stem.contains("memory") => EntryKind::Memory,
        "md" | "mdx" | "txt" => EntryKind::Knowledge,
        "json" if path.components().any(|c| c.as_os_str() == "config") => EntryKind::Config,
        _ => EntryKind::Code,
    }
}

/// Whether `path` passes the indexing engine's extension allow-list and
/// excluded-directory globs ("File filters accept a
/// configurable extension allow-list and exclude common build/dependency
/// directories").
pub fn passes_filters(path: &Path, config: &IndexingConfig) -> bool {
    let excluded = globset::GlobSetBuilder::new();
    let excluded = config
        .excluded_globs
        .iter()
        .filter_map(|g| globset::Glob::new(g).ok())
        .fold(excluded, |mut acc, g| {
            acc.add(g);
            acc
        })
        .build()
        .unwrap_or_else(|_| globset::GlobSetBuilder::new().build().expect("empty globset is always valid"));
    if excluded.is_match(path) {
        return false;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => config.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_config_from_extension() {
        assert_eq!(infer_entry_kind(Path::new("/etc/app.toml")), EntryKind::Config);
    }

    #[test]
    fn infers_decision_record_from_stem() {
        assert_eq!(infer_entry_kind(Path::new("/docs/decision-0001-use-sqlite.md")), EntryKind::DecisionRecord);
    }

    #[test]
    fn falls_back_to_code() {
        assert_eq!(infer_entry_kind(Path::new("/src/main.rs")), EntryKind::Code);
    }

    #[test]
    fn excludes_build_directories() {
        let config = IndexingConfig::default();
        assert!(!passes_filters(Path::new("/repo/target/debug/main.rs"), &config));
        assert!(passes_filters(Path::new("/repo/src/main.rs"), &config));
    }

    #[test]
    fn rejects_disallowed_extension() {
        let config = IndexingConfig::default();
        assert!(!passes_filters(Path::new("/repo/image.png"), &config));
    }
}
