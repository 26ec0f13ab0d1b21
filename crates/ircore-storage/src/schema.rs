//! Schema creation, idempotent via `CREATE TABLE IF NOT EXISTS`. There is
//! exactly one schema version right now; if it ever needs to change, add a
//! `migrations` module the way the teacher does rather than editing this
//! function's statements in place.

use ircore_core::errors::IrResult;
use rusqlite::Connection;

use crate::errors::to_ir_err;

pub fn initialize(conn: &Connection) -> IrResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entries (
            id              TEXT PRIMARY KEY,
            kind            TEXT NOT NULL,
            title           TEXT NOT NULL,
            body            TEXT NOT NULL,
            path            TEXT NOT NULL UNIQUE,
            content_hash    TEXT NOT NULL,
            last_modified   TEXT NOT NULL,
            tags            TEXT NOT NULL DEFAULT '[]',
            agent_affinity  TEXT NOT NULL DEFAULT '[]',
            category        TEXT,
            project_id      TEXT,
            language        TEXT,
            usage_count     INTEGER NOT NULL DEFAULT 0,
            last_used       TEXT,
            effectiveness   REAL NOT NULL DEFAULT 0.0,
            success_rate    REAL NOT NULL DEFAULT 0.0,
            related_ids     TEXT NOT NULL DEFAULT '[]',
            parent_id       TEXT,
            child_ids       TEXT NOT NULL DEFAULT '[]',
            file_size       INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_entries_kind ON entries(kind);
        CREATE INDEX IF NOT EXISTS idx_entries_category ON entries(category);
        CREATE INDEX IF NOT EXISTS idx_entries_project ON entries(project_id);
        CREATE INDEX IF NOT EXISTS idx_entries_last_modified ON entries(last_modified);

        CREATE VIRTUAL TABLE IF NOT EXISTS entries_fts USING fts5(
            title,
            body,
            tags,
            category,
            content='entries',
            content_rowid='rowid',
            tokenize='porter unicode61'
        );

        CREATE TRIGGER IF NOT EXISTS entries_fts_insert AFTER INSERT ON entries BEGIN
            INSERT INTO entries_fts(rowid, title, body, tags, category)
            VALUES (new.rowid, new.title, new.body, new.tags, new.category);
        END;

        CREATE TRIGGER IF NOT EXISTS entries_fts_delete AFTER DELETE ON entries BEGIN
            INSERT INTO entries_fts(entries_fts, rowid, title, body, tags, category)
            VALUES ('delete', old.rowid, old.title, old.body, old.tags, old.category);
        END;

        CREATE TRIGGER IF NOT EXISTS entries_fts_update AFTER UPDATE ON entries BEGIN
            INSERT INTO entries_fts(entries_fts, rowid, title, body, tags, category)
            VALUES ('delete', old.rowid, old.title, old.body, old.tags, old.category);
            INSERT INTO entries_fts(rowid, title, body, tags, category)
            VALUES (new.rowid, new.title, new.body, new.tags, new.category);
        END;

        CREATE TABLE IF NOT EXISTS relationships (
            source_id           TEXT NOT NULL,
            target_id           TEXT NOT NULL,
            relationship_type   TEXT NOT NULL,
            strength            REAL NOT NULL,
            evidence            TEXT NOT NULL DEFAULT '[]',
            PRIMARY KEY (source_id, target_id, relationship_type)
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_target ON relationships(target_id);
        ",
    )
    .map_err(to_ir_err)?;
    Ok(())
}
