// Checkpoint files: `snapshot_<level>_<unix millis>.json`, owner-only, never rewritten.

use crate::domain::ports::{SnapshotStore, StoreError};
use crate::interface_adapters::utils::ids::checkpoint_millis;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn prefix(level_id: &str) -> String {
        format!("snapshot_{level_id}_")
    }

    fn file_name(level_id: &str, millis: u64) -> String {
        // Zero padding keeps lexical order equal to time order.
        format!("{}{millis:0width$}.json", Self::prefix(level_id), width = MILLIS_DIGITS)
    }

    // Exact match only: level `a` must not pick up files of level `a_b`.
    fn is_checkpoint_of(name: &str, level_id: &str) -> bool {
        name.strip_prefix(&Self::prefix(level_id))
            .and_then(|rest| rest.strip_suffix(".json"))
            .is_some_and(|stamp| {
                stamp.len() == MILLIS_DIGITS && stamp.bytes().all(|b| b.is_ascii_digit())
            })
    }
}

const MILLIS_DIGITS: usize = 20;

fn create_private(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

fn write_private_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let written = create_private(&tmp).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, level_id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(level_id, checkpoint_millis()));
        write_private_atomic(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "checkpoint written");
        Ok(())
    }

    fn latest(&self, level_id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut newest: Option<String> = None;
        for entry in entries {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if !Self::is_checkpoint_of(&name, level_id) {
                continue;
            }
            if newest.as_ref().is_none_or(|n| name > *n) {
                newest = Some(name);
            }
        }

        match newest {
            Some(name) => Ok(Some(fs::read(self.dir.join(name))?)),
            None => Ok(None),
        }
    }
}
