//! Aggregate statistics used by health reporting and maintenance
//! scheduling.

use ircore_core::entry::EntryKind;
use ircore_core::errors::IrResult;
use rusqlite::{params, Connection};

use super::row::str_to_kind;
use crate::errors::to_ir_err;

pub fn count_by_kind(conn: &Connection) -> IrResult<Vec<(EntryKind, usize)>> {
    let mut stmt =
        conn.prepare("SELECT kind, COUNT(*) FROM entries GROUP BY kind").map_err(to_ir_err)?;
    let rows = stmt
        .query_map([], |row| {
            let kind: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((str_to_kind(&kind), count as usize))
        })
        .map_err(to_ir_err)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(to_ir_err)?);
    }
    Ok(out)
}

pub fn stale_count(conn: &Connection, threshold_days: u64) -> IrResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entries
             WHERE julianday('now') - julianday(last_modified) > ?1",
            params![threshold_days as f64],
            |row| row.get(0),
        )
        .map_err(to_ir_err)?;
    Ok(count as usize)
}

pub fn total_entries(conn: &Connection) -> IrResult<usize> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0)).map_err(to_ir_err)?;
    Ok(count as usize)
}

pub fn average_effectiveness(conn: &Connection) -> IrResult<f64> {
    conn.query_row("SELECT COALESCE(AVG(effectiveness), 0.0) FROM entries", [], |row| row.get(0))
        .map_err(to_ir_err)
}
