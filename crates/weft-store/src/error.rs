use thiserror::Error;

/// Errors produced by the store layer.
///
/// Absence is not an error: single-row lookups return `Option`, keeping
/// "no match" an ordinary value on the linking read path.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An underlying SQLite call failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No platform data directory could be resolved.
    #[error("No application data directory available")]
    NoDataDir,

    /// Filesystem error while preparing the database location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema migration could not be applied.
    #[error("Migration failed: {0}")]
    Migration(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
