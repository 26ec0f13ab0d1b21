//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 256MB mmap, 64MB cache, 5s busy_timeout,
//! foreign_keys ON, incremental auto_vacuum.

use ircore_core::errors::IrResult;
use rusqlite::Connection;

use crate::errors::to_ir_err;

/// Pragmas applied to the single writer connection.
pub fn apply_write_pragmas(conn: &Connection) -> IrResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = 268435456;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        PRAGMA auto_vacuum = INCREMENTAL;
        ",
    )
    .map_err(to_ir_err)?;
    Ok(())
}

/// Pragmas applied to each read-pool connection. No WAL write-ahead
/// settings needed since readers never write, but the busy_timeout still
/// matters for the brief window around a writer checkpoint.
pub fn apply_read_pragmas(conn: &Connection) -> IrResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -32000;
        ",
    )
    .map_err(to_ir_err)?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> IrResult<bool> {
    let mode: String =
        conn.pragma_query_value(None, "journal_mode", |row| row.get(0)).map_err(to_ir_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
