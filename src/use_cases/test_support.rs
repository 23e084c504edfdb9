use std::sync::{Arc, Mutex};

use crate::domain::LevelDescription;
use crate::domain::dialog::StandardProvider;
use crate::domain::ports::{LevelRepository, SnapshotStore, StoreError};
use crate::domain::test_support::scenario_level;

use super::session::GameHost;

// In-memory level source for use-case tests.
#[derive(Clone)]
pub(crate) struct MemoryLevels(LevelDescription);

impl MemoryLevels {
    pub(crate) fn scenario() -> Self {
        Self(scenario_level())
    }

    pub(crate) fn level(&self) -> LevelDescription {
        self.0.clone()
    }
}

impl LevelRepository for MemoryLevels {
    fn load(&self, level_id: &str) -> Result<LevelDescription, StoreError> {
        if level_id == self.0.id {
            Ok(self.0.clone())
        } else {
            Err(StoreError::LevelNotFound(level_id.to_string()))
        }
    }
}

// Records every checkpoint so tests can count writes.
#[derive(Clone, Default)]
pub(crate) struct MemorySnapshots {
    saved: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySnapshots {
    pub(crate) fn saved_count(&self) -> usize {
        self.saved.lock().expect("snapshots mutex poisoned").len()
    }
}

impl SnapshotStore for MemorySnapshots {
    fn save(&self, _level_id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut guard = self.saved.lock().expect("snapshots mutex poisoned");
        guard.push(bytes.to_vec());
        Ok(())
    }

    fn latest(&self, _level_id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self.saved.lock().expect("snapshots mutex poisoned");
        Ok(guard.last().cloned())
    }
}

pub(crate) fn host_with(snapshots: MemorySnapshots) -> GameHost {
    GameHost::new(
        "test",
        Arc::new(MemoryLevels::scenario()),
        Arc::new(snapshots),
        Arc::new(StandardProvider::new()),
    )
}
