//! Fetcher contract and built-in fetchers.
//!
//! A fetcher produces the complete current state of one external source, or
//! fails as a unit with a [`FetchError`]. How it retrieves that state — and
//! any timeout, retry, or pacing policy — is entirely its own business; the
//! core only consumes this contract.

use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::state::{Item, State};

/// Produces the current state of one monitored source.
pub trait Fetcher: Send {
    /// Item type this fetcher produces.
    type Item: Item;

    /// Retrieve the complete current state.
    ///
    /// # Errors
    /// Any retrieval problem, reported as a unit with a human-readable
    /// message. The monitor skips the cycle and retries next interval.
    fn fetch(&mut self) -> Result<State<Self::Item>, FetchError>;
}

/// Adapter turning a closure into a [`Fetcher`].
///
/// Mostly useful for tests and small embedded deployments.
pub struct FnFetcher<T, F> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnFetcher<T, F>
where
    T: Item,
    F: FnMut() -> Result<State<T>, FetchError> + Send,
{
    /// Wraps a closure as a fetcher.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Fetcher for FnFetcher<T, F>
where
    T: Item,
    F: FnMut() -> Result<State<T>, FetchError> + Send,
{
    type Item = T;

    fn fetch(&mut self) -> Result<State<T>, FetchError> {
        (self.f)()
    }
}

/// One file observed by a [`DirectoryFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File size in bytes.
    pub size_bytes: u64,
    /// Last modification time as seconds since the Unix epoch, when the
    /// platform reports one.
    pub modified_epoch_secs: Option<u64>,
}

/// Built-in fetcher that treats the regular files of a directory as items,
/// keyed by file name.
///
/// Subdirectories are not descended into. A file changes when its size or
/// modification time changes.
pub struct DirectoryFetcher {
    path: PathBuf,
}

impl DirectoryFetcher {
    /// Creates a fetcher observing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for DirectoryFetcher {
    type Item = FileEntry;

    fn fetch(&mut self) -> Result<State<FileEntry>, FetchError> {
        let entries = fs::read_dir(&self.path)
            .map_err(|e| FetchError::new(format!("cannot read {}: {e}", self.path.display())))?;

        let mut state = State::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| FetchError::new(format!("cannot list {}: {e}", self.path.display())))?;
            let metadata = entry.metadata().map_err(|e| {
                FetchError::new(format!("cannot stat {}: {e}", entry.path().display()))
            })?;
            if !metadata.is_file() {
                continue;
            }

            let key = entry.file_name().to_string_lossy().into_owned();
            let modified_epoch_secs = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs());

            state.insert(
                key,
                FileEntry {
                    size_bytes: metadata.len(),
                    modified_epoch_secs,
                },
            );
        }

        Ok(state)
    }
}
