//! Shared test tooling for the Intelligence Retrieval Core workspace:
//! typed loading of JSON golden files under a `fixtures/` directory, plus
//! plain builder functions for the core domain types so every crate's
//! tests construct `Entry`/`SearchResult` the same way.

pub mod builders;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the `fixtures/` folder, found by walking up from
/// `CARGO_MANIFEST_DIR` until a sibling `fixtures/` directory appears.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("fixtures").exists() {
        if !path.pop() {
            panic!("Could not find a fixtures directory from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", path.display()))
}

/// Load a fixture file as raw JSON.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List every JSON file directly under a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {e}", dir.display()))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::builders;
    use std::io::Write;

    #[test]
    fn load_fixture_round_trips_through_a_temp_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CARGO_MANIFEST_DIR", dir.path());
        std::fs::create_dir(dir.path().join("fixtures")).unwrap();
        let mut file = std::fs::File::create(dir.path().join("fixtures/sample.json")).unwrap();
        write!(file, r#"{{"answer": 42}}"#).unwrap();

        let value = super::load_fixture_value("sample.json");
        assert_eq!(value["answer"], 42);
        assert!(super::fixture_exists("sample.json"));
        assert!(!super::fixture_exists("missing.json"));
    }

    #[test]
    fn entry_builder_produces_stable_content_addressed_ids() {
        let a = builders::entry(ircore_core::entry::EntryKind::Knowledge, "title", "body", "/a.md");
        let b = builders::entry(ircore_core::entry::EntryKind::Knowledge, "title", "body", "/a.md");
        assert_eq!(a.id, b.id);
    }
}
