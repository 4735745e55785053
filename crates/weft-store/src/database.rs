//! Connection management for the Weft store.
//!
//! [`Database`] owns a [`rusqlite::Connection`] and guarantees that
//! migrations have run before any other operation touches it.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Handle to the open store database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data
    /// directory:
    /// - Linux:   `~/.local/share/weft/weft.db`
    /// - macOS:   `~/Library/Application Support/org.weft.weft/weft.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\weft\weft\data\weft.db`
    pub fn open_default() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("org", "weft", "weft").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("weft.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL journal; foreign keys enforced on every connection.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Open a private in-memory database.  Used by tests; everything is
    /// lost when the handle is dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        // WAL does not apply to in-memory databases.
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// The underlying `rusqlite::Connection`.
    ///
    /// The typed helpers cover the normal read/write surface; direct
    /// access remains available for transactions and ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access to the underlying connection.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Filesystem path of the open database, `None` when in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let alice_id = {
            let db = Database::open_at(&path).expect("should open");
            db.add_person("alice@pod.example", "Alice", true).unwrap().id
        };

        let db = Database::open_at(&path).expect("second open should succeed");
        assert!(db.path().is_some());
        let alice = db.get_person(alice_id).unwrap().unwrap();
        assert_eq!(alice.handle, "alice@pod.example");
    }

    #[test]
    fn reopen_keeps_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        drop(Database::open_at(&path).unwrap());
        let db = Database::open_at(&path).expect("second open should succeed");

        let version: u32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, migrations::CURRENT_VERSION);
    }
}
