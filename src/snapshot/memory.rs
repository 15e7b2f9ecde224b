//! In-memory snapshot store.
//!
//! Keeps the last known state in process memory. Nothing survives a restart;
//! intended for tests and embedded deployments that do not need durability.

use crate::diff::{diff, ChangeSet};
use crate::error::StorageError;
use crate::snapshot::SnapshotStore;
use crate::state::{Item, State};

/// In-memory [`SnapshotStore`].
#[derive(Debug, Default)]
pub struct MemorySnapshotStore<T> {
    state: State<T>,
}

impl<T: Item> MemorySnapshotStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::new(),
        }
    }

    /// Creates a store pre-seeded with `state`, as if it had been committed
    /// previously.
    #[must_use]
    pub fn with_state(state: State<T>) -> Self {
        Self { state }
    }
}

impl<T: Item> SnapshotStore<T> for MemorySnapshotStore<T> {
    fn load(&self) -> Result<State<T>, StorageError> {
        Ok(self.state.clone())
    }

    fn commit(&mut self, current: State<T>) -> Result<ChangeSet<T>, StorageError> {
        let changes = diff(&self.state, &current);
        self.state = current;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store: MemorySnapshotStore<u32> = MemorySnapshotStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn commit_replaces_state_and_returns_changes() {
        let mut store = MemorySnapshotStore::new();

        let mut first = State::new();
        first.insert("a".to_string(), 1u32);
        let changes = store.commit(first.clone()).unwrap();
        assert_eq!(changes.created.len(), 1);
        assert_eq!(store.load().unwrap(), first);

        let mut second = State::new();
        second.insert("a".to_string(), 2u32);
        let changes = store.commit(second.clone()).unwrap();
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn seeded_store_diffs_against_seed() {
        let mut seed = State::new();
        seed.insert("a".to_string(), 1u32);

        let mut store = MemorySnapshotStore::with_state(seed);
        let changes = store.commit(State::new()).unwrap();
        assert_eq!(changes.deleted.len(), 1);
    }
}
