use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::storage::KeyValueStorage;

/// Durable key-value storage backed by one JSON file per key under a
/// state directory. Writes go through a temp file and rename so a
/// crashed write never leaves a half-written record behind.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|err| AppError::StorageUnavailable(format!("{}: {}", self.root.display(), err)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::StorageUnavailable(format!(
                "reading '{}': {}",
                key, err
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.ensure_root()?;
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|err| AppError::StorageUnavailable(format!("writing '{}': {}", key, err)))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::StorageUnavailable(format!(
                "removing '{}': {}",
                key, err
            ))),
        }
    }
}

/// Picks the storage root: an explicit state dir if it is usable,
/// otherwise `None` so the caller can fall back to in-memory storage.
pub fn open_state_dir(dir: &Path) -> Option<FileStorage> {
    if let Err(err) = fs::create_dir_all(dir) {
        log::warn!(
            "state directory '{}' unavailable ({}); persistence disabled",
            dir.display(),
            err
        );
        return None;
    }
    Some(FileStorage::new(dir))
}
