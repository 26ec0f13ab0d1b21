//! Stages 3-7 of the assembly pipeline: gather, prioritize, budget,
//! assemble, render. Stages 1/2/8 (cache probe, provenance session,
//! cache store) live in [`crate::engine`], which wraps this function.

pub mod assembling;
pub mod rendering;

use std::collections::HashMap;

use ircore_budget::BudgetEnforcer;
use ircore_core::config::{AssemblerConfig, BudgetConfig};
use ircore_core::context_pack::{ContextPackContent, TokenUsageSummary};
use ircore_core::entry::Entry;
use ircore_core::section::{Section, SectionBucket};
use ircore_core::traits::IPackRenderer;
use ircore_prioritizer::{ContentPrioritizer, PrioritizationContext};
use ircore_tokens::TokenCounter;
use tracing::{debug, info};

use crate::gatherer::{GathererKind, GathererRegistry};
use crate::request::AssembleRequest;

pub struct PipelineOutcome {
    pub content: ContextPackContent,
    pub token_usage: TokenUsageSummary,
    pub degraded: bool,
}

fn bucket_for(kind: GathererKind) -> SectionBucket {
    match kind {
        GathererKind::Memory => SectionBucket::Memory,
        GathererKind::Knowledge => SectionBucket::Knowledge,
        GathererKind::IndexSearch | GathererKind::Retriever => SectionBucket::Realtime,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_pipeline(
    request: &AssembleRequest,
    gatherers: &GathererRegistry,
    prioritizer: &ContentPrioritizer,
    budget_config: &BudgetConfig,
    token_counter: &TokenCounter,
    assembler_config: &AssemblerConfig,
    renderer: Option<&dyn IPackRenderer>,
) -> (PipelineOutcome, Vec<String>) {
    let mut warnings = Vec::new();

    // Stage 3: gathering.
    let gathering = gatherers.gather_all(request);
    debug!(candidate_count = gathering.all_candidates().len(), "gathering complete");
    warnings.extend(gathering.warnings.clone());

    let mut kind_by_entry: HashMap<String, GathererKind> = HashMap::new();
    let mut entry_lookup: HashMap<String, Entry> = HashMap::new();
    let mut deduped = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for kind in [GathererKind::Memory, GathererKind::Knowledge, GathererKind::IndexSearch, GathererKind::Retriever] {
        let Some(items) = gathering.candidates.get(&kind) else { continue };
        for item in items {
            kind_by_entry.entry(item.entry.id.clone()).or_insert(kind);
            entry_lookup.entry(item.entry.id.clone()).or_insert_with(|| item.entry.clone());
            if seen.insert(item.entry.id.clone()) {
                deduped.push(item.clone());
            }
        }
    }

    // Stage 4: prioritization.
    let context = PrioritizationContext { agent_type: Some(request.agent_type.clone()), ..Default::default() };
    let prioritization = prioritizer.prioritize(&deduped, &context);
    debug!(ranked = prioritization.primary.len(), "prioritization complete");

    let sections: Vec<Section> = prioritization
        .primary
        .iter()
        .map(|item| {
            let bucket = kind_by_entry.get(&item.entry_id).copied().map(bucket_for).unwrap_or(SectionBucket::Knowledge);
            let body = entry_lookup.get(&item.entry_id).map(|e| e.body.clone()).unwrap_or_default();
            let mut section = Section::new(&item.entry_id, bucket, body);
            section.priority = item.composite_score;
            section
        })
        .collect();

    // Stage 5: budget enforcement.
    let budget = budget_config.default_token_budget.saturating_sub(budget_config.reserved_headroom);
    let enforcer = BudgetEnforcer::new(budget_config, token_counter);
    let enforcement = enforcer.enforce(sections, budget);
    info!(
        survivors = enforcement.sections.len(),
        total_tokens = enforcement.usage.total_tokens,
        budget, "budget enforcement complete"
    );
    let mut usage = enforcement.usage;
    warnings.extend(usage.warnings.iter().cloned());

    // Stage 6: assembly.
    let (mut content, assembling_warnings) = assembling::partition_and_synthesize(
        &enforcement.sections,
        &entry_lookup,
        request,
        assembler_config.memory_content_percentage,
    );
    warnings.extend(assembling_warnings.clone());

    // Stage 7: render.
    let mut degraded = false;
    if let Some(render_warning) = rendering::render(renderer, &request.template_id, &mut content) {
        warnings.push(render_warning);
        degraded = true;
    }

    usage.warnings = warnings.clone();
    usage.warnings.dedup();

    (PipelineOutcome { content, token_usage: usage, degraded }, warnings)
}
