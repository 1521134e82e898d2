use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    core::log::{LogError, TripLog},
    persist::{PersistError, StateStore},
    trip::{TripDraft, TripRecord},
    types::{Km, MonthKey},
};

use super::events::TripEvent;

/// Errors surfaced by [`TripLogHandle`] calls.
#[derive(Debug)]
pub enum RuntimeError {
    /// The in-memory log rejected the operation.
    Log(LogError),
    /// The state store failed to persist the mutation. The in-memory change
    /// has already been applied when this is returned.
    Persist(PersistError),
    /// The runtime task is gone.
    ChannelClosed,
}

impl From<LogError> for RuntimeError {
    fn from(value: LogError) -> Self {
        Self::Log(value)
    }
}

impl From<PersistError> for RuntimeError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Channel bounds for the runtime task. There is no batching and no timer:
/// every mutation is followed by one synchronous full-state save.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command channel feeding the writer task.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

/// Cloneable handle to the single-writer task that owns the [`TripLog`].
#[derive(Clone)]
pub struct TripLogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<TripEvent>,
}

enum Command {
    SetVehicleId {
        id: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    AddTrip {
        draft: TripDraft,
        resp: oneshot::Sender<Result<bool, RuntimeError>>,
    },
    DeleteTrip {
        index: usize,
        resp: oneshot::Sender<Result<TripRecord, RuntimeError>>,
    },
    VehicleId {
        resp: oneshot::Sender<String>,
    },
    Records {
        resp: oneshot::Sender<Vec<TripRecord>>,
    },
    MonthlySummary {
        resp: oneshot::Sender<Vec<(MonthKey, Km)>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

type SharedStore = Arc<Mutex<Box<dyn StateStore>>>;

/// Spawns the writer task that owns `log`, persisting through `store` after
/// every mutation when one is given.
pub fn spawn_triplog(
    log: TripLog,
    store: Option<Box<dyn StateStore>>,
    config: RuntimeConfig,
) -> TripLogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<TripEvent>(config.event_queue_bound);

    let store = store.map(|s| Arc::new(Mutex::new(s)));
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut log = log;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut log, &events_tx_loop, store.as_ref()).await {
                break;
            }
        }
    });

    TripLogHandle { cmd_tx, events_tx }
}

impl TripLogHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.events_tx.subscribe()
    }

    /// Replaces the vehicle identifier and persists.
    pub async fn set_vehicle_id(&self, id: impl Into<String>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SetVehicleId {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Adds a trip. `Ok(false)` means the draft was rejected and nothing
    /// changed; `Ok(true)` means the record was prepended and persisted.
    pub async fn add_trip(&self, draft: TripDraft) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::AddTrip { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Deletes the trip at `index`, returning the removed record.
    pub async fn delete_trip(&self, index: usize) -> Result<TripRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeleteTrip { index, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Current vehicle identifier.
    pub async fn vehicle_id(&self) -> Result<String, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::VehicleId { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// All records in stored (newest-first) order.
    pub async fn records(&self) -> Result<Vec<TripRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Records { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Monthly distance totals in first-occurrence key order.
    pub async fn monthly_summary(&self) -> Result<Vec<(MonthKey, Km)>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::MonthlySummary { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the writer task after the current command.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

async fn handle_command(
    cmd: Command,
    log: &mut TripLog,
    events_tx: &broadcast::Sender<TripEvent>,
    store: Option<&SharedStore>,
) -> bool {
    match cmd {
        Command::SetVehicleId { id, resp } => {
            log.set_vehicle_id(id);
            let res = persist_state(log, store, events_tx).await;
            if res.is_ok() {
                let _ = events_tx.send(TripEvent::VehicleIdChanged);
            }
            let _ = resp.send(res);
        }
        Command::AddTrip { draft, resp } => {
            let res = if log.add_trip(draft).is_some() {
                match persist_state(log, store, events_tx).await {
                    Ok(()) => {
                        let _ = events_tx.send(TripEvent::Added);
                        Ok(true)
                    }
                    Err(err) => Err(err),
                }
            } else {
                debug!("trip draft rejected, no state change");
                Ok(false)
            };
            let _ = resp.send(res);
        }
        Command::DeleteTrip { index, resp } => {
            let res = match log.delete_trip(index) {
                Ok(record) => match persist_state(log, store, events_tx).await {
                    Ok(()) => {
                        let _ = events_tx.send(TripEvent::Deleted { index });
                        Ok(record)
                    }
                    Err(err) => Err(err),
                },
                Err(err) => Err(RuntimeError::from(err)),
            };
            let _ = resp.send(res);
        }
        Command::VehicleId { resp } => {
            let _ = resp.send(log.vehicle_id().to_string());
        }
        Command::Records { resp } => {
            let _ = resp.send(log.records().to_vec());
        }
        Command::MonthlySummary { resp } => {
            let _ = resp.send(log.monthly_summary());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(Ok(()));
            return true;
        }
    }

    false
}

async fn persist_state(
    log: &TripLog,
    store: Option<&SharedStore>,
    events_tx: &broadcast::Sender<TripEvent>,
) -> Result<(), RuntimeError> {
    let Some(store) = store else {
        return Ok(());
    };

    let snapshot = log.snapshot();
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut store = store.blocking_lock();
        store.save(&snapshot)
    })
    .await
    .map_err(|e| PersistError::Message(format!("join error: {e}")))??;

    let _ = events_tx.send(TripEvent::Saved);
    Ok(())
}
