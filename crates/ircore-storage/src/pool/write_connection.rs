//! The single SQLite writer connection. SQLite allows only one writer at a
//! time regardless of how many handles are open, so every mutating query
//! is serialized through this one connection behind a mutex rather than
//! fighting `SQLITE_BUSY` across a pool.

use std::path::Path;
use std::sync::Mutex;

use ircore_core::errors::IrResult;
use rusqlite::Connection;

use super::pragmas::apply_write_pragmas;
use crate::errors::to_ir_err;
use crate::schema;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> IrResult<Self> {
        let conn = Connection::open(path).map_err(to_ir_err)?;
        apply_write_pragmas(&conn)?;
        schema::initialize(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> IrResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_ir_err)?;
        apply_write_pragmas(&conn)?;
        schema::initialize(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Execute a closure against the writer connection, holding the lock
    /// for the closure's duration.
    pub fn with_conn<F, T>(&self, f: F) -> IrResult<T>
    where
        F: FnOnce(&Connection) -> IrResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| ircore_core::errors::IrError::DatabaseConnection {
                message: format!("writer lock poisoned: {e}"),
            })?;
        f(&guard)
    }
}
