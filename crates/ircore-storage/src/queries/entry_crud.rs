//! Single and bulk CRUD against the `entries` table.

use ircore_core::entry::Entry;
use ircore_core::errors::IrResult;
use rusqlite::{params, Connection};

use super::row::{kind_to_str, parse_entry_row, ENTRY_COLUMNS};
use crate::errors::to_ir_err;

pub fn insert_entry(conn: &Connection, entry: &Entry) -> IrResult<()> {
    conn.execute(
        "INSERT INTO entries (
            id, kind, title, body, path, content_hash, last_modified,
            tags, agent_affinity, category, project_id, language, usage_count, last_used,
            effectiveness, success_rate, related_ids, parent_id, child_ids, file_size
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            body = excluded.body,
            content_hash = excluded.content_hash,
            last_modified = excluded.last_modified,
            tags = excluded.tags,
            agent_affinity = excluded.agent_affinity,
            category = excluded.category,
            project_id = excluded.project_id,
            language = excluded.language,
            related_ids = excluded.related_ids,
            parent_id = excluded.parent_id,
            child_ids = excluded.child_ids,
            file_size = excluded.file_size",
        params![
            entry.id,
            kind_to_str(entry.kind),
            entry.title,
            entry.body,
            entry.path,
            entry.content_hash,
            entry.last_modified.to_rfc3339(),
            serde_json::to_string(&entry.metadata.tags).unwrap_or_default(),
            serde_json::to_string(&entry.metadata.agent_affinity).unwrap_or_default(),
            entry.metadata.category,
            entry.metadata.project_id,
            entry.metadata.language,
            entry.metadata.usage_count as i64,
            entry.metadata.last_used.map(|t| t.to_rfc3339()),
            entry.metadata.effectiveness.value(),
            entry.metadata.success_rate.value(),
            serde_json::to_string(&entry.metadata.related_ids).unwrap_or_default(),
            entry.metadata.parent_id,
            serde_json::to_string(&entry.metadata.child_ids).unwrap_or_default(),
            entry.metadata.file_size as i64,
        ],
    )
    .map_err(to_ir_err)?;
    Ok(())
}

pub fn get_entry(conn: &Connection, id: &str) -> IrResult<Option<Entry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1");
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let mut rows = stmt.query(params![id]).map_err(to_ir_err)?;
    match rows.next().map_err(to_ir_err)? {
        Some(row) => Ok(Some(parse_entry_row(row).map_err(to_ir_err)?)),
        None => Ok(None),
    }
}

pub fn update_entry(conn: &Connection, entry: &Entry) -> IrResult<()> {
    insert_entry(conn, entry)
}

pub fn delete_entry(conn: &Connection, id: &str) -> IrResult<()> {
    conn.execute("DELETE FROM entries WHERE id = ?1", params![id]).map_err(to_ir_err)?;
    Ok(())
}

pub fn bulk_insert(conn: &Connection, entries: &[Entry]) -> IrResult<usize> {
    let tx = conn.unchecked_transaction().map_err(to_ir_err)?;
    let mut count = 0;
    for entry in entries {
        insert_entry(&tx, entry)?;
        count += 1;
    }
    tx.commit().map_err(to_ir_err)?;
    Ok(count)
}

pub fn bulk_get(conn: &Connection, ids: &[String]) -> IrResult<Vec<Entry>> {
    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(entry) = get_entry(conn, id)? {
            results.push(entry);
        }
    }
    Ok(results)
}

pub fn get_by_path(conn: &Connection, path: &str) -> IrResult<Option<Entry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE path = ?1");
    let mut stmt = conn.prepare(&sql).map_err(to_ir_err)?;
    let mut rows = stmt.query(params![path]).map_err(to_ir_err)?;
    match rows.next().map_err(to_ir_err)? {
        Some(row) => Ok(Some(parse_entry_row(row).map_err(to_ir_err)?)),
        None => Ok(None),
    }
}

pub fn delete_by_path(conn: &Connection, path: &str) -> IrResult<()> {
    conn.execute("DELETE FROM entries WHERE path = ?1", params![path]).map_err(to_ir_err)?;
    Ok(())
}

pub fn record_usage(conn: &Connection, id: &str) -> IrResult<()> {
    conn.execute(
        "UPDATE entries SET usage_count = usage_count + 1, last_used = ?2 WHERE id = ?1",
        params![id, chrono::Utc::now().to_rfc3339()],
    )
    .map_err(to_ir_err)?;
    Ok(())
}
