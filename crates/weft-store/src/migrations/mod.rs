//! Schema migration runner.
//!
//! Every `Database::open_*` call runs pending migrations before handing
//! the connection out. The SQLite `user_version` pragma records how far
//! the schema has advanced, so each migration applies exactly once.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Version the schema is at once every migration has run.
pub(crate) const CURRENT_VERSION: u32 = 1;

/// Bring the connected database up to [`CURRENT_VERSION`].
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version >= CURRENT_VERSION {
        return Ok(());
    }

    if version < 1 {
        tracing::info!("applying migration v001_initial");
        v001_initial::up(conn).map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    // Future migrations continue the chain:
    // if version < 2 { v002_xxx::up(conn)?; ... }

    tracing::info!(from = version, to = CURRENT_VERSION, "database schema migrated");

    Ok(())
}
