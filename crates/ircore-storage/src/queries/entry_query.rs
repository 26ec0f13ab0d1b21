//! Structured (non-FTS) queries against `entries`.

use chrono::{DateTime, Utc};
use ircore_core::entry::{Entry, EntryKind};
use ircore_core::errors::IrResult;
use rusqlite::{params, Connection};

use super::row::{kind_to_str, parse_entry_row, ENTRY_COLUMNS};
use crate::errors::to_ir_err;

pub fn query_by_kind(conn: &Connection, kind: EntryKind) -> IrResult<Vec<Entry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE kind = ?1 ORDER BY last_modified DESC");
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let rows = stmt.query_map(params![kind_to_str(kind)], |row| Ok(parse_entry_row(row))).map_err(to_ir_err)?;
    collect(rows)
}

pub fn query_by_tags(conn: &Connection, tags: &[String]) -> IrResult<Vec<Entry>> {
    if tags.is_empty() {
        return Ok(Vec::new());
    }
    let clauses = tags.iter().map(|_| "tags LIKE ?").collect::<Vec<_>>().join(" OR ");
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE {clauses} ORDER BY last_modified DESC");
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let patterns: Vec<String> = tags.iter().map(|t| format!("%\"{t}\"%")).collect();
    let rows = stmt
        .query_map(rusqlite::params_from_iter(patterns.iter()), |row| Ok(parse_entry_row(row)))
        .map_err(to_ir_err)?;
    collect(rows)
}

pub fn query_by_date_range(
    conn: &Connection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> IrResult<Vec<Entry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM entries WHERE last_modified >= ?1 AND last_modified <= ?2 ORDER BY last_modified DESC"
    );
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let rows = stmt
        .query_map(params![from.to_rfc3339(), to.to_rfc3339()], |row| Ok(parse_entry_row(row)))
        .map_err(to_ir_err)?;
    collect(rows)
}

/// Completion candidates: distinct entry titles starting with `prefix`,
/// case-insensitive, alphabetical, capped at `limit`.
pub fn suggest(conn: &Connection, prefix: &str, limit: usize) -> IrResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT title FROM entries
             WHERE title LIKE ?1 ESCAPE '\\' COLLATE NOCASE
             ORDER BY title LIMIT ?2",
        )
        .map_err(to_ir_err)?;
    let pattern = format!("{}%", escape_like(prefix));
    let rows = stmt.query_map(params![pattern, limit as i64], |row| row.get::<_, String>(0)).map_err(to_ir_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(to_ir_err)?);
    }
    Ok(out)
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn collect(
    rows: impl Iterator<Item = rusqlite::Result<rusqlite::Result<Entry, rusqlite::Error>>>,
) -> IrResult<Vec<Entry>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(to_ir_err)?.map_err(to_ir_err)?);
    }
    Ok(out)
}
