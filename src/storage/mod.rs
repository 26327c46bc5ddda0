//! # Persistence Boundary
//!
//! The core never does I/O on its own; callers persist state through the
//! [`StateRepository`] trait. [`FileRepository`] is the bundled
//! implementation: one JSON file per key inside a data directory, all
//! filenames carrying a common prefix so `clear_all` cannot touch
//! foreign files.
//!
//! Failures are explicit [`StorageError`]s; nothing is silently
//! swallowed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::{DatasetKey, SweepTable};
use crate::snapshot::SnapshotError;
use crate::store::ModelStore;

/// Default filename prefix for repository keys
pub const DEFAULT_KEY_PREFIX: &str = "ag_bp_";

/// Repository key under which the dataset tables are persisted
pub const RESULTS_KEY: &str = "results_data";

/// Errors raised by repository operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem access failed
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Stored payload could not be encoded or decoded
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Key/value persistence for JSON payloads.
///
/// Keys are short identifiers like `results_data`; payloads are
/// serialized JSON. Implementations outside this crate (a remote
/// database, an in-memory test double) plug in here.
pub trait StateRepository {
    /// Store `json` under `key`, replacing any previous value
    fn save(&self, key: &str, json: &str) -> Result<(), StorageError>;

    /// Load the payload stored under `key`, or `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Delete the payload stored under `key`; absence is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every payload this repository owns
    fn clear_all(&self) -> Result<(), StorageError>;
}

/// File-backed repository: `<dir>/<prefix><key>.json`
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
    prefix: String,
}

impl FileRepository {
    /// Repository in `dir` with the default key prefix
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, DEFAULT_KEY_PREFIX)
    }

    /// Repository in `dir` with a custom key prefix
    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, key))
    }

    fn io_err(path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl StateRepository for FileRepository {
    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_err(&self.dir, e))?;
        let path = self.path_for(key);
        debug!("saving {} bytes to {}", json.len(), path.display());
        fs::write(&path, json).map_err(|e| Self::io_err(&path, e))
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(&path, e)),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(&path, e)),
        }
    }

    fn clear_all(&self) -> Result<(), StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Self::io_err(&self.dir, e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| Self::io_err(&self.dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            // Only our own files; the directory may be shared.
            if name.starts_with(&self.prefix) && name.ends_with(".json") {
                let path = entry.path();
                fs::remove_file(&path).map_err(|e| Self::io_err(&path, e))?;
            }
        }
        Ok(())
    }
}

/// Persist all dataset tables under [`RESULTS_KEY`].
pub fn save_datasets<R: StateRepository>(
    store: &ModelStore,
    repo: &R,
) -> Result<(), StorageError> {
    let tables: BTreeMap<DatasetKey, &SweepTable> = DatasetKey::ALL
        .iter()
        .map(|&key| (key, store.dataset(key)))
        .collect();
    let json = serde_json::to_string_pretty(&tables).map_err(SnapshotError::from)?;
    repo.save(RESULTS_KEY, &json)
}

/// Load previously persisted dataset tables into the store.
///
/// Returns `false` when nothing was persisted yet; buckets absent from
/// the stored payload keep their current rows.
pub fn load_datasets<R: StateRepository>(
    store: &mut ModelStore,
    repo: &R,
) -> Result<bool, StorageError> {
    let Some(json) = repo.load(RESULTS_KEY)? else {
        return Ok(false);
    };

    let tables: BTreeMap<DatasetKey, SweepTable> =
        serde_json::from_str(&json).map_err(SnapshotError::from)?;
    for (key, table) in tables {
        *store.dataset_mut(key) = table;
    }
    Ok(true)
}
