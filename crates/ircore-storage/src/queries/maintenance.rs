//! VACUUM, checkpoint, and integrity check.

use ircore_core::errors::IrResult;
use rusqlite::Connection;

use crate::errors::to_ir_err;

pub fn incremental_vacuum(conn: &Connection, pages: u32) -> IrResult<()> {
    conn.execute_batch(&format!("PRAGMA incremental_vacuum({pages})")).map_err(to_ir_err)?;
    Ok(())
}

pub fn full_vacuum(conn: &Connection) -> IrResult<()> {
    conn.execute_batch("VACUUM").map_err(to_ir_err)?;
    Ok(())
}

pub fn wal_checkpoint(conn: &Connection) -> IrResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)").map_err(to_ir_err)?;
    Ok(())
}

pub fn integrity_check(conn: &Connection) -> IrResult<bool> {
    let result: String =
        conn.query_row("PRAGMA integrity_check", [], |row| row.get(0)).map_err(to_ir_err)?;
    Ok(result == "ok")
}

/// Rebuild the FTS index from scratch against the current `entries`
/// table, used after bulk imports or when `integrity_check` finds the
/// shadow tables have drifted from their content table.
pub fn rebuild_fts(conn: &Connection) -> IrResult<()> {
    conn.execute_batch("INSERT INTO entries_fts(entries_fts) VALUES ('rebuild')").map_err(to_ir_err)?;
    Ok(())
}

/// Fraction of free pages relative to total pages, used to decide when a
/// full `VACUUM` is worth its cost versus an incremental one.
pub fn fragmentation_pct(conn: &Connection) -> IrResult<f64> {
    let page_count: i64 =
        conn.query_row("PRAGMA page_count", [], |row| row.get(0)).map_err(to_ir_err)?;
    let freelist_count: i64 =
        conn.query_row("PRAGMA freelist_count", [], |row| row.get(0)).map_err(to_ir_err)?;
    if page_count == 0 {
        return Ok(0.0);
    }
    Ok((freelist_count as f64 / page_count as f64) * 100.0)
}
