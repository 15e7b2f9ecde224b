//! Durable last-known-state storage.
//!
//! A snapshot store owns the persisted record of one source's last known
//! state and mediates all diffing against it. Two implementations are
//! provided: [`FileSnapshotStore`] for durable deployments and
//! [`MemorySnapshotStore`] for tests and embedded use.

mod file;
mod memory;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use crate::diff::ChangeSet;
use crate::error::StorageError;
use crate::state::{Item, State};

/// Owns the durable record of the last known state for one source.
///
/// No two monitors share a store; each store exclusively owns its backing
/// record.
pub trait SnapshotStore<T: Item>: Send {
    /// Returns the persisted state, or an empty state if none exists yet.
    ///
    /// # Errors
    /// [`StorageError`] if persisted data exists but is unreadable or
    /// malformed. This is fatal for the source's startup and not retried.
    fn load(&self) -> Result<State<T>, StorageError>;

    /// Diff `current` against the persisted state, persist `current` as the
    /// new snapshot, and return the changes (possibly empty).
    ///
    /// Persistence is replace-on-success: a failed write leaves the previous
    /// snapshot intact, and a concurrent reader can never observe a
    /// half-written record.
    ///
    /// # Errors
    /// [`StorageError`] if the previous state cannot be loaded or the new
    /// state cannot be persisted.
    fn commit(&mut self, current: State<T>) -> Result<ChangeSet<T>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check: the trait must stay object-safe, monitors hold it
    // boxed.
    fn _assert_object_safe(_: &dyn SnapshotStore<String>) {}
}
