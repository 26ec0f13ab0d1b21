//! Stage 6 (Assembly): partition surviving sections by bucket,
//! synthesize the executive summary / key insights / critical actions,
//! and fill the agent-specific block.

use std::collections::HashMap;

use ircore_core::context_pack::ContextPackContent;
use ircore_core::entry::{Entry, EntryKind};
use ircore_core::section::{Section, SectionBucket};

use crate::algorithms::{textrank, tfidf};
use crate::request::AssembleRequest;

const SUMMARY_SENTENCES: usize = 3;
const KEY_INSIGHT_PHRASES: usize = 5;
const MAX_CRITICAL_ACTIONS: usize = 5;

fn bucket_text(sections: &[&Section]) -> String {
    let mut ordered: Vec<&&Section> = sections.iter().collect();
    ordered.sort_by(|a, b| b.priority.partial_cmp(&a.priority).unwrap_or(std::cmp::Ordering::Equal));
    ordered.into_iter().map(|s| s.content.as_str()).collect::<Vec<_>>().join("\n\n")
}

pub fn partition_and_synthesize(
    sections: &[Section],
    entry_lookup: &HashMap<String, Entry>,
    request: &AssembleRequest,
    memory_target_pct: f64,
) -> (ContextPackContent, Vec<String>) {
    let mut warnings = Vec::new();

    let memory_sections: Vec<&Section> = sections.iter().filter(|s| s.bucket == SectionBucket::Memory).collect();
    let knowledge_sections: Vec<&Section> = sections.iter().filter(|s| s.bucket == SectionBucket::Knowledge).collect();
    let realtime_sections: Vec<&Section> = sections.iter().filter(|s| s.bucket == SectionBucket::Realtime).collect();

    let memory_text = bucket_text(&memory_sections);
    let knowledge_text = bucket_text(&knowledge_sections);
    let realtime_text = bucket_text(&realtime_sections);

    let total_len = (memory_text.len() + knowledge_text.len() + realtime_text.len()).max(1);
    let memory_share = memory_text.len() as f64 / total_len as f64;
    if !sections.is_empty() && memory_share < memory_target_pct {
        warnings.push(format!(
            "memory content share {:.2} below configured target {:.2}",
            memory_share, memory_target_pct
        ));
    }

    let full_text = [memory_text.as_str(), knowledge_text.as_str(), realtime_text.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n");
    let executive_summary = textrank::summarize(&full_text, SUMMARY_SENTENCES);

    let docs: Vec<String> = sections.iter().map(|s| s.content.clone()).collect();
    let key_insights: Vec<String> =
        tfidf::extract_key_phrases(&docs, KEY_INSIGHT_PHRASES).into_iter().map(|(term, _score)| term).collect();

    let critical_actions: Vec<String> = sections
        .iter()
        .filter_map(|s| entry_lookup.get(&s.id))
        .filter(|e| matches!(e.kind, EntryKind::Pitfall | EntryKind::DecisionRecord))
        .take(MAX_CRITICAL_ACTIONS)
        .map(|e| e.title.clone())
        .collect();

    let agent_specific = format!(
        "agent_type={} project={}",
        request.agent_type,
        request.project_id.as_deref().unwrap_or("none")
    );

    let content = ContextPackContent {
        memory: memory_text,
        knowledge: knowledge_text,
        realtime: realtime_text,
        agent_specific,
        related_context_refs: sections.iter().map(|s| s.id.clone()).collect(),
        executive_summary,
        key_insights,
        critical_actions,
    };

    (content, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ircore_core::entry::EntryMetadata;

    fn entry(id: &str, kind: EntryKind, title: &str) -> Entry {
        Entry {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            body: format!("Body content for {id}. It describes something useful."),
            path: "/p".to_string(),
            content_hash: "h".to_string(),
            last_modified: Utc::now(),
            metadata: EntryMetadata::default(),
        }
    }

    fn section(id: &str, bucket: SectionBucket, content: &str, priority: f64) -> Section {
        let mut s = Section::new(id, bucket, content);
        s.priority = priority;
        s
    }

    #[test]
    fn low_memory_share_emits_warning() {
        let sections = vec![
            section("k1", SectionBucket::Knowledge, "knowledge body text here", 0.9),
            section("m1", SectionBucket::Memory, "m", 0.1),
        ];
        let lookup = HashMap::new();
        let request = AssembleRequest::default();
        let (_content, warnings) = partition_and_synthesize(&sections, &lookup, &request, 0.3);
        assert!(warnings.iter().any(|w| w.contains("memory content share")));
    }

    #[test]
    fn critical_actions_pull_from_pitfall_entries() {
        let sections = vec![section("p1", SectionBucket::Knowledge, "pitfall body", 0.9)];
        let mut lookup = HashMap::new();
        lookup.insert("p1".to_string(), entry("p1", EntryKind::Pitfall, "Avoid X"));
        let request = AssembleRequest::default();
        let (content, _warnings) = partition_and_synthesize(&sections, &lookup, &request, 0.0);
        assert_eq!(content.critical_actions, vec!["Avoid X".to_string()]);
    }

    #[test]
    fn empty_sections_produce_empty_pack_without_warning() {
        let lookup = HashMap::new();
        let request = AssembleRequest::default();
        let (content, warnings) = partition_and_synthesize(&[], &lookup, &request, 0.3);
        assert!(content.memory.is_empty());
        assert!(warnings.is_empty());
    }
}
