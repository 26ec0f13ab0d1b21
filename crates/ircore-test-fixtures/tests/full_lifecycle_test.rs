//! End-to-end: index a handful of entries in a real SQLite store, gather
//! them through the retrieval engine, and assemble a context pack from
//! the result — the same wiring a production deployment would use.

use std::sync::Arc;

use ircore_assembler::{AssemblerEngine, ContentGatherer, GathererKind, GathererRegistry};
use ircore_bandit::BanditLearner;
use ircore_cache::ContextPackCache;
use ircore_core::config::{AssemblerConfig, BanditConfig, BudgetConfig, CacheConfig, PerformanceConfig, RetrievalConfig};
use ircore_core::entry::EntryKind;
use ircore_core::errors::IrResult;
use ircore_core::search::SearchResult;
use ircore_core::traits::IEntryStorage;
use ircore_retrieval::engine::{HybridRetriever, RetrievalMode, RetrievalRequest};
use ircore_storage::StorageEngine;
use ircore_test_fixtures::builders;

struct RetrieverGatherer {
    retriever: HybridRetriever,
}

impl ContentGatherer for RetrieverGatherer {
    fn gather(&self, request: &ircore_assembler::AssembleRequest) -> IrResult<Vec<SearchResult>> {
        let outcome = self
            .retriever
            .retrieve(&RetrievalRequest { query: request.query.clone(), limit: 10, ..Default::default() }, None)
            .map_err(ircore_core::errors::IrError::from)?;
        Ok(outcome.results)
    }
}

#[test]
fn indexed_entries_flow_through_retrieval_into_an_assembled_pack() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    storage
        .create(&builders::tagged_entry(
            EntryKind::Knowledge,
            "bcrypt cost factor",
            "Always use bcrypt with a cost factor of at least 12 for password hashing.",
            "/docs/security/bcrypt.md",
            &["security"],
        ))
        .unwrap();
    storage
        .create(&builders::tagged_entry(
            EntryKind::Pitfall,
            "avoid MD5 for passwords",
            "MD5 is not suitable for password hashing; it is too fast to brute force.",
            "/docs/security/md5-pitfall.md",
            &["security"],
        ))
        .unwrap();

    let bandit = Arc::new(BanditLearner::new(BanditConfig::default()));
    let retriever =
        HybridRetriever::new(storage.clone(), bandit, RetrievalConfig::default(), RetrievalMode::Parallel);

    let mut gatherers = GathererRegistry::new();
    gatherers.register(GathererKind::Retriever, Box::new(RetrieverGatherer { retriever }));

    let engine = AssemblerEngine::new(
        gatherers,
        BudgetConfig::default(),
        AssemblerConfig::default(),
        PerformanceConfig::default(),
        ContextPackCache::new(&CacheConfig::default()),
    );

    let outcome = engine.assemble(&ircore_assembler::AssembleRequest {
        issue_id: "issue-42".to_string(),
        agent_type: "backend".to_string(),
        query: "password hashing".to_string(),
        template_id: "default".to_string(),
        ..Default::default()
    });

    assert!(!outcome.cache_hit);
    assert!(!outcome.pack.content.realtime.is_empty());
    assert!(outcome.warnings.iter().any(|w| w.contains("Memory Manager not available")));
    assert!(outcome.warnings.iter().any(|w| w.contains("Knowledge Manager not available")));

    let replay = engine.assemble(&ircore_assembler::AssembleRequest {
        issue_id: "issue-42".to_string(),
        agent_type: "backend".to_string(),
        query: "password hashing".to_string(),
        template_id: "default".to_string(),
        ..Default::default()
    });
    assert!(replay.cache_hit);
}
