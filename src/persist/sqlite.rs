//! SQLite-backed full-state snapshot store.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::log::LogSnapshotV1;

use super::{PersistResult, StateStore};

const SNAPSHOT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEnvelope {
    format_version: u16,
    snapshot: LogSnapshotV1,
}

/// SQLite implementation of [`crate::persist::StateStore`]. Holds the whole
/// log as one versioned JSON payload in a single-row table.
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStateStore {
    fn load(&mut self) -> PersistResult<Option<LogSnapshotV1>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row("SELECT payload FROM state WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        // Unreadable prior state is "no prior state", never a fatal error.
        match serde_json::from_slice::<SnapshotEnvelope>(&payload) {
            Ok(env) if env.format_version == SNAPSHOT_FORMAT_VERSION => Ok(Some(env.snapshot)),
            Ok(env) => {
                warn!(
                    format_version = env.format_version,
                    "unsupported snapshot format, starting empty"
                );
                Ok(None)
            }
            Err(err) => {
                warn!(%err, "snapshot payload decode failed, starting empty");
                Ok(None)
            }
        }
    }

    fn save(&mut self, snapshot: &LogSnapshotV1) -> PersistResult<()> {
        let env = SnapshotEnvelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot: snapshot.clone(),
        };
        let payload = serde_json::to_vec(&env)?;
        self.conn.execute(
            "INSERT INTO state(id, ts_ms, payload) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET ts_ms = excluded.ts_ms, payload = excluded.payload",
            params![now_ms() as i64, payload],
        )?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
