//! Shared row <-> `Entry` conversion used by every query module.

use chrono::{DateTime, Utc};
use ircore_core::entry::{Entry, EntryKind, EntryMetadata};
use rusqlite::{Row, Error as SqlError};

pub fn kind_to_str(kind: EntryKind) -> &'static str {
    kind.as_str()
}

pub fn str_to_kind(s: &str) -> EntryKind {
    match s {
        "memory" => EntryKind::Memory,
        "decision_record" => EntryKind::DecisionRecord,
        "pitfall" => EntryKind::Pitfall,
        "code" => EntryKind::Code,
        "config" => EntryKind::Config,
        _ => EntryKind::Knowledge,
    }
}

fn parse_json_set(raw: &str) -> std::collections::HashSet<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn parse_json_vec(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Parse one `entries` row into an `Entry`. Column order must match every
/// `SELECT` in this crate — see `ENTRY_COLUMNS`.
pub fn parse_entry_row(row: &Row) -> Result<Entry, SqlError> {
    let kind_str: String = row.get("kind")?;
    let tags: String = row.get("tags")?;
    let agent_affinity: String = row.get("agent_affinity")?;
    let related_ids: String = row.get("related_ids")?;
    let child_ids: String = row.get("child_ids")?;
    let last_modified: String = row.get("last_modified")?;
    let last_used: Option<String> = row.get("last_used")?;

    Ok(Entry {
        id: row.get("id")?,
        kind: str_to_kind(&kind_str),
        title: row.get("title")?,
        body: row.get("body")?,
        path: row.get("path")?,
        content_hash: row.get("content_hash")?,
        last_modified: last_modified
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
        metadata: EntryMetadata {
            tags: parse_json_set(&tags),
            agent_affinity: parse_json_set(&agent_affinity),
            category: row.get("category")?,
            project_id: row.get("project_id")?,
            language: row.get("language")?,
            usage_count: row.get::<_, i64>("usage_count")? as u64,
            last_used: last_used.and_then(|s| s.parse::<DateTime<Utc>>().ok()),
            effectiveness: row.get::<_, f64>("effectiveness")?.into(),
            success_rate: row.get::<_, f64>("success_rate")?.into(),
            related_ids: parse_json_vec(&related_ids),
            parent_id: row.get("parent_id")?,
            child_ids: parse_json_vec(&child_ids),
            file_size: row.get::<_, i64>("file_size")? as u64,
        },
    })
}

pub const ENTRY_COLUMNS: &str = "id, kind, title, body, path, content_hash, last_modified,
    tags, agent_affinity, category, project_id, language, usage_count, last_used,
    effectiveness, success_rate, related_ids, parent_id, child_ids, file_size";
