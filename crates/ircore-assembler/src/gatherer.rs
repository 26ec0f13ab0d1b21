//! Pluggable content sources the Gathering stage pulls from. A missing
//! gatherer downgrades to a warning rather than failing the assembly
//! (§4.11 step 3: "Missing collaborators downgrade to warnings, not
//! errors").

use std::collections::HashMap;

use ircore_core::errors::IrResult;
use ircore_core::search::SearchResult;
use tracing::warn;

use crate::request::AssembleRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GathererKind {
    Memory,
    Knowledge,
    IndexSearch,
    Retriever,
}

impl GathererKind {
    /// Label used verbatim in "<label> not available" warnings, matching
    /// the graceful-degradation wording callers assert on.
    pub fn label(self) -> &'static str {
        match self {
            GathererKind::Memory => "Memory Manager",
            GathererKind::Knowledge => "Knowledge Manager",
            GathererKind::IndexSearch => "Index Search",
            GathererKind::Retriever => "Retriever",
        }
    }
}

/// One content source the Gathering stage can pull candidates from.
pub trait ContentGatherer: Send + Sync {
    fn gather(&self, request: &AssembleRequest) -> IrResult<Vec<SearchResult>>;
}

/// The registered set of gatherers for an assembly run. Absent entries
/// are reported as warnings, not errors.
#[derive(Default)]
pub struct GathererRegistry {
    gatherers: HashMap<GathererKind, Box<dyn ContentGatherer>>,
}

impl GathererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: GathererKind, gatherer: Box<dyn ContentGatherer>) {
        self.gatherers.insert(kind, gatherer);
    }

    /// Run every registered gatherer, one thread per source so they run
    /// concurrently (§4.11 step 3 "in parallel"). Returns the combined
    /// candidate set, tagged by which gatherer produced each one, plus a
    /// warning per missing or failed gatherer.
    pub fn gather_all(&self, request: &AssembleRequest) -> GatheringOutcome {
        let mut warnings = Vec::new();
        let kinds = [GathererKind::Memory, GathererKind::Knowledge, GathererKind::IndexSearch, GathererKind::Retriever];

        let mut by_kind: Vec<(GathererKind, &dyn ContentGatherer)> = Vec::new();
        for kind in kinds {
            match self.gatherers.get(&kind) {
                Some(g) => by_kind.push((kind, g.as_ref())),
                None => warnings.push(format!("{} not available", kind.label())),
            }
        }

        let results: Vec<(GathererKind, IrResult<Vec<SearchResult>>)> = std::thread::scope(|scope| {
            let handles: Vec<_> = by_kind
                .iter()
                .map(|(kind, gatherer)| {
                    let kind = *kind;
                    scope.spawn(move || (kind, gatherer.gather(request)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("gatherer thread panicked")).collect()
        });

        let mut candidates: HashMap<GathererKind, Vec<SearchResult>> = HashMap::new();
        for (kind, result) in results {
            match result {
                Ok(items) => {
                    candidates.insert(kind, items);
                }
                Err(err) => {
                    warn!(gatherer = kind.label(), error = %err, "gatherer failed, treating as unavailable");
                    warnings.push(format!("{} failed: {err}", kind.label()));
                }
            }
        }

        GatheringOutcome { candidates, warnings }
    }
}

#[derive(Default)]
pub struct GatheringOutcome {
    pub candidates: HashMap<GathererKind, Vec<SearchResult>>,
    pub warnings: Vec<String>,
}

impl GatheringOutcome {
    pub fn all_candidates(&self) -> Vec<SearchResult> {
        self.candidates.values().flatten().cloned().collect()
    }

    pub fn memory_item_count(&self) -> usize {
        self.candidates.get(&GathererKind::Memory).map(|v| v.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ircore_core::entry::{Entry, EntryKind, EntryMetadata};

    fn entry(id: &str) -> Entry {
        Entry {
            id: id.to_string(),
            kind: EntryKind::Knowledge,
            title: "t".to_string(),
            body: "b".to_string(),
            path: "/p".to_string(),
            content_hash: "h".to_string(),
            last_modified: Utc::now(),
            metadata: EntryMetadata::default(),
        }
    }

    struct FixedGatherer(Vec<SearchResult>);
    impl ContentGatherer for FixedGatherer {
        fn gather(&self, _request: &AssembleRequest) -> IrResult<Vec<SearchResult>> {
            Ok(self.0.clone())
        }
    }

    struct FailingGatherer;
    impl ContentGatherer for FailingGatherer {
        fn gather(&self, _request: &AssembleRequest) -> IrResult<Vec<SearchResult>> {
            Err(ircore_core::errors::IrError::NotInitialized { component: "test".into() })
        }
    }

    #[test]
    fn missing_gatherers_produce_exact_warnings() {
        let registry = GathererRegistry::new();
        let outcome = registry.gather_all(&AssembleRequest::default());
        assert!(outcome.warnings.contains(&"Memory Manager not available".to_string()));
        assert!(outcome.warnings.contains(&"Knowledge Manager not available".to_string()));
    }

    #[test]
    fn registered_gatherer_contributes_candidates() {
        let mut registry = GathererRegistry::new();
        registry.register(GathererKind::IndexSearch, Box::new(FixedGatherer(vec![SearchResult::new(entry("a"), 0.5, 1)])));
        let outcome = registry.gather_all(&AssembleRequest::default());
        assert_eq!(outcome.all_candidates().len(), 1);
    }

    #[test]
    fn failing_gatherer_downgrades_to_warning() {
        let mut registry = GathererRegistry::new();
        registry.register(GathererKind::Retriever, Box::new(FailingGatherer));
        let outcome = registry.gather_all(&AssembleRequest::default());
        assert!(outcome.warnings.iter().any(|w| w.starts_with("Retriever failed")));
        assert!(outcome.all_candidates().is_empty());
    }
}
