//! Connection setup and schema migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::StorageError;

pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (creating if needed) the settings database at `path` and bring its schema up to date.
pub fn open(path: &Path) -> Result<SharedConnection, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    run_migrations(&conn)?;
    log::debug!("Opened settings store at {}", path.display());
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database, used when no settings path is configured.
pub fn open_in_memory() -> Result<SharedConnection, StorageError> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    )?;

    let current = current_version(conn)?;
    if current < 1 {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS app_settings (
                setting_key TEXT PRIMARY KEY NOT NULL,
                setting_value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );",
        )?;
        set_version(conn, 1)?;
        log::info!("Applied settings schema version 1");
    }
    Ok(())
}

fn current_version(conn: &Connection) -> Result<i64, StorageError> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_version(conn: &Connection, version: i64) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO schema_migrations (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}
