use crate::domain::LevelDescription;
use crate::domain::ports::{LevelRepository, StoreError};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Reads `<dir>/<level id>.json` level descriptions.
pub struct FileLevelRepository {
    dir: PathBuf,
}

impl FileLevelRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LevelRepository for FileLevelRepository {
    fn load(&self, level_id: &str) -> Result<LevelDescription, StoreError> {
        let path = self.dir.join(format!("{level_id}.json"));
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::LevelNotFound(level_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let level: LevelDescription = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), objects = level.objects.len(), "level loaded");
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::scenario_level;

    #[test]
    fn loads_level_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let level = scenario_level();
        let json = serde_json::to_vec(&level).expect("encode");
        fs::write(dir.path().join("test.json"), json).expect("write");

        let loaded = FileLevelRepository::new(dir.path()).load("test").expect("load");
        assert_eq!(loaded.id, level.id);
        assert_eq!(loaded.objects.len(), level.objects.len());
    }

    #[test]
    fn missing_level_is_reported_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FileLevelRepository::new(dir.path())
            .load("nowhere")
            .expect_err("missing");
        assert!(matches!(err, StoreError::LevelNotFound(id) if id == "nowhere"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("bad.json"), b"{ not json").expect("write");
        let err = FileLevelRepository::new(dir.path()).load("bad").expect_err("bad");
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
