use crate::domain::dialog::DialogProvider;
use crate::domain::ports::{LevelRepository, SnapshotStore, StoreError};
use crate::domain::{
    ChecksumError, Engine, Input, InventoryEntry, LevelError, SnapshotError, TickReport,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{info, warn};

// Session host: owns the single authoritative engine and its remote driver.

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no active session")]
    NoSession,
    #[error("checksum mismatch")]
    Cheated,
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Observable host state, shown instead of the game while idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostStatus {
    pub connected: bool,
    pub won: bool,
    pub cheated: bool,
}

/// Sent to a freshly connected driver.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub level_id: String,
    /// Snapshot bytes the driver rebuilds its replica from.
    pub snapshot: Vec<u8>,
}

pub struct GameHost {
    level_id: String,
    levels: Arc<dyn LevelRepository>,
    snapshots: Arc<dyn SnapshotStore>,
    dialogs: Arc<dyn DialogProvider + Send + Sync>,
    engine: Mutex<Option<Engine>>,
    status: Mutex<HostStatus>,
    inventory: Mutex<Vec<InventoryEntry>>,
    // One remote driver at a time.
    slot: Arc<Semaphore>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameHost {
    pub fn new(
        level_id: impl Into<String>,
        levels: Arc<dyn LevelRepository>,
        snapshots: Arc<dyn SnapshotStore>,
        dialogs: Arc<dyn DialogProvider + Send + Sync>,
    ) -> Self {
        Self {
            level_id: level_id.into(),
            levels,
            snapshots,
            dialogs,
            engine: Mutex::new(None),
            status: Mutex::new(HostStatus::default()),
            inventory: Mutex::new(Vec::new()),
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    /// Reserves the single driver slot; `None` while another driver is connected.
    pub fn try_claim(&self) -> Option<OwnedSemaphorePermit> {
        self.slot.clone().try_acquire_owned().ok()
    }

    /// Builds the engine, resuming from the newest checkpoint if one exists.
    pub fn open(&self) -> Result<SessionStart, SessionError> {
        let level = self.levels.load(&self.level_id)?;
        let engine = match self.snapshots.latest(&self.level_id)? {
            Some(bytes) => {
                info!(level_id = %self.level_id, "resuming from checkpoint");
                Engine::from_snapshot(&level, self.dialogs.as_ref(), &bytes)?
            }
            None => Engine::new(&level, self.dialogs.as_ref())?,
        };
        let snapshot = engine.snapshot()?;

        *lock(&self.inventory) = engine.inventory();
        *lock(&self.engine) = Some(engine);
        let mut status = lock(&self.status);
        status.connected = true;
        status.won = false;

        Ok(SessionStart {
            level_id: self.level_id.clone(),
            snapshot,
        })
    }

    /// Validates the driver's view of the prior state, then runs one tick.
    ///
    /// Blocks while a dialog backend answers; call it from a blocking worker.
    pub fn process_input(&self, checksum: &str, input: &Input) -> Result<TickReport, SessionError> {
        let (report, checkpoint) = {
            let mut guard = lock(&self.engine);
            let engine = guard.as_mut().ok_or(SessionError::NoSession)?;

            match engine.validate_checksum(checksum) {
                Ok(()) => {}
                Err(ChecksumError::Mismatch { expected, claimed }) => {
                    warn!(tick = engine.tick, %expected, %claimed, "checksum mismatch");
                    *guard = None;
                    lock(&self.status).cheated = true;
                    return Err(SessionError::Cheated);
                }
                Err(ChecksumError::Encode(e)) => return Err(e.into()),
            }

            let report = engine.update(input);
            let checkpoint = if report.checkpoint {
                *lock(&self.inventory) = engine.inventory();
                Some(engine.snapshot()?)
            } else {
                None
            };
            (report, checkpoint)
        };

        if report.win {
            let mut status = lock(&self.status);
            if !status.won {
                info!(level_id = %self.level_id, "level won");
            }
            status.won = true;
        }

        if let Some(bytes) = checkpoint {
            if let Err(e) = self.snapshots.save(&self.level_id, &bytes) {
                warn!(error = %e, "failed to write checkpoint");
            }
        }

        Ok(report)
    }

    /// Tears the engine down; the cached inventory stays readable.
    pub fn close(&self) {
        *lock(&self.engine) = None;
        lock(&self.status).connected = false;
    }

    pub fn status(&self) -> HostStatus {
        *lock(&self.status)
    }

    pub fn inventory(&self) -> Vec<InventoryEntry> {
        lock(&self.inventory).clone()
    }
}
