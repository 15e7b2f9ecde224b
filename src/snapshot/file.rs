//! File-backed snapshot store.
//!
//! Persists one source's state as a single human-inspectable JSON file:
//!
//! ```text
//! {
//!   "version": 1,
//!   "items": { "<key>": <item>, ... }
//! }
//! ```
//!
//! Replacement is atomic: the new state is written to a sibling temp file,
//! synced, then renamed over the old file. A process killed between cycles
//! leaves either the old snapshot or the new one, never a torn file.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diff::{diff, ChangeSet};
use crate::error::StorageError;
use crate::snapshot::SnapshotStore;
use crate::state::{Item, State};

/// Snapshot file format version this build reads and writes.
const FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct SnapshotFile<T> {
    version: u32,
    items: State<T>,
}

#[derive(Serialize)]
struct SnapshotFileRef<'a, T> {
    version: u32,
    items: &'a State<T>,
}

/// File-backed [`SnapshotStore`] keeping one JSON state file per source.
///
/// The file is exclusively owned by this store, so the persisted state is
/// read from disk once and cached across cycles; every commit replaces both
/// the cache and the file.
pub struct FileSnapshotStore<T> {
    path: PathBuf,
    cached: Option<State<T>>,
}

impl<T: Item> FileSnapshotStore<T> {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet; parent directories are created
    /// on the first commit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_failed(&self, source: std::io::Error) -> StorageError {
        StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn persist(&self, state: &State<T>) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(&SnapshotFileRef {
            version: FORMAT_VERSION,
            items: state,
        })
        .map_err(|e| StorageError::Encode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        let mut tmp = File::create(&tmp_path).map_err(|e| self.write_failed(e))?;
        tmp.write_all(&encoded).map_err(|e| self.write_failed(e))?;
        tmp.sync_all().map_err(|e| self.write_failed(e))?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.write_failed(e))
    }
}

impl<T: Item> SnapshotStore<T> for FileSnapshotStore<T> {
    fn load(&self) -> Result<State<T>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(State::new()),
            Err(e) => {
                return Err(StorageError::Unreadable {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let parsed: SnapshotFile<T> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if parsed.version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                path: self.path.clone(),
                found: parsed.version,
                expected: FORMAT_VERSION,
            });
        }

        Ok(parsed.items)
    }

    fn commit(&mut self, current: State<T>) -> Result<ChangeSet<T>, StorageError> {
        let previous = match self.cached.take() {
            Some(state) => state,
            None => self.load()?,
        };
        let changes = diff(&previous, &current);
        self.persist(&current)?;
        self.cached = Some(current);
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(pairs: &[(&str, u64)]) -> State<u64> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    #[test]
    fn first_run_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store: FileSnapshotStore<u64> = FileSnapshotStore::new(dir.path().join("s.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn commit_then_load_round_trips_on_fresh_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let s = state(&[("a", 1), ("b", 2)]);

        let mut store = FileSnapshotStore::new(&path);
        store.commit(s.clone()).unwrap();

        let fresh: FileSnapshotStore<u64> = FileSnapshotStore::new(&path);
        assert_eq!(fresh.load().unwrap(), s);
    }

    #[test]
    fn commit_diffs_against_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("s.json"));

        let changes = store.commit(state(&[("a", 1)])).unwrap();
        assert_eq!(changes.created.len(), 1);

        let changes = store.commit(state(&[("a", 2), ("b", 7)])).unwrap();
        assert_eq!(changes.created.len(), 1);
        assert_eq!(changes.updated.len(), 1);
        assert!(changes.deleted.is_empty());

        let changes = store.commit(state(&[("b", 7)])).unwrap();
        assert_eq!(changes.deleted.len(), 1);
        assert!(changes.created.is_empty());
        assert!(changes.updated.is_empty());
    }

    #[test]
    fn commit_returns_empty_changes_for_unchanged_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("s.json"));
        store.commit(state(&[("a", 1)])).unwrap();

        let changes = store.commit(state(&[("a", 1)])).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn commit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/s.json");
        let mut store = FileSnapshotStore::new(&path);
        store.commit(state(&[("a", 1)])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn commit_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let mut store = FileSnapshotStore::new(&path);
        store.commit(state(&[("a", 1)])).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, b"{ not json").unwrap();

        let store: FileSnapshotStore<u64> = FileSnapshotStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn future_format_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, br#"{"version": 99, "items": {}}"#).unwrap();

        let store: FileSnapshotStore<u64> = FileSnapshotStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn snapshot_file_is_human_inspectable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let mut store = FileSnapshotStore::new(&path);
        store.commit(state(&[("a", 1)])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"version\": 1"));
        assert!(text.contains("\"a\": 1"));
    }
}
