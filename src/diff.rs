//! Snapshot diff engine.
//!
//! [`diff`] is a pure, total function from two states of a uniquely-keyed
//! item collection to the set of operations separating them. No I/O, no
//! concurrency, no failure modes. Item equality is full structural equality:
//! a key whose item is replaced by an attribute-wise identical instance
//! produces nothing.

use crate::state::{ItemKey, State};

/// A key present in both states whose value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update<T> {
    /// The item's key.
    pub key: ItemKey,
    /// The previously known value.
    pub before: T,
    /// The freshly fetched value.
    pub after: T,
}

/// The operations separating two states, partitioned by kind.
///
/// Within each kind, entries are ordered by ascending key. No cross-kind
/// order is implied; reporters choose their own presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<T> {
    /// Keys present in `current` but not in `previous`, with their items.
    pub created: Vec<(ItemKey, T)>,
    /// Keys present in `previous` but not in `current`, with the previous
    /// items (kept for reporting).
    pub deleted: Vec<(ItemKey, T)>,
    /// Keys present in both whose values differ.
    pub updated: Vec<Update<T>>,
}

impl<T> ChangeSet<T> {
    /// True when no operation of any kind was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }

    /// Total number of operations across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.created.len() + self.deleted.len() + self.updated.len()
    }
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            deleted: Vec::new(),
            updated: Vec::new(),
        }
    }
}

/// Compare two states and return the operations separating them.
///
/// - Create for each key only in `current`.
/// - Delete for each key only in `previous` (carrying the previous item).
/// - Update for each key in both whose items are unequal.
///
/// Both inputs iterate in ascending key order, so each partition of the
/// result is already sorted.
#[must_use]
pub fn diff<T>(previous: &State<T>, current: &State<T>) -> ChangeSet<T>
where
    T: Clone + PartialEq,
{
    let mut changes = ChangeSet::default();

    for (key, item) in current {
        match previous.get(key) {
            None => changes.created.push((key.clone(), item.clone())),
            Some(before) if before != item => changes.updated.push(Update {
                key: key.clone(),
                before: before.clone(),
                after: item.clone(),
            }),
            Some(_) => {}
        }
    }

    for (key, item) in previous {
        if !current.contains_key(key) {
            changes.deleted.push((key.clone(), item.clone()));
        }
    }

    changes
}
