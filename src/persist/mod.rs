pub mod sqlite;

use crate::core::log::{LogSnapshotV1, TripLog};

/// Failures in the persistence layer.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Snapshot payload (de)serialization failure.
    Serde(serde_json::Error),
    /// Anything else, as a message.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Full-state store: one snapshot per installation, overwritten wholesale on
/// every mutation.
pub trait StateStore: Send {
    /// Loads the persisted snapshot, or `None` when no usable prior state
    /// exists. Implementations treat a malformed payload as missing state,
    /// never as a fatal condition.
    fn load(&mut self) -> PersistResult<Option<LogSnapshotV1>>;

    /// Replaces the persisted snapshot.
    fn save(&mut self, snapshot: &LogSnapshotV1) -> PersistResult<()>;

    /// Snapshot-or-empty initialization: the loaded log, or a fresh empty one
    /// when nothing usable is stored.
    fn load_log(&mut self) -> PersistResult<TripLog> {
        Ok(match self.load()? {
            Some(snapshot) => TripLog::from_snapshot(snapshot),
            None => TripLog::new(),
        })
    }
}
