//! Snapshot durability across store instances, with a domain-shaped item
//! type exercising the serde round-trip.

use serde::{Deserialize, Serialize};

use lookout::{FileSnapshotStore, SnapshotStore, State, StorageError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Job {
    title: String,
    location: Option<String>,
    url: Option<String>,
}

fn job(title: &str, location: Option<&str>) -> Job {
    Job {
        title: title.to_string(),
        location: location.map(str::to_string),
        url: None,
    }
}

fn jobs_state() -> State<Job> {
    let mut state = State::new();
    state.insert("req-100".to_string(), job("Rust Engineer", Some("Remote")));
    state.insert("req-101".to_string(), job("SRE", None));
    state
}

#[test]
fn commit_then_load_on_a_fresh_instance_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");

    let mut store = FileSnapshotStore::new(&path);
    store.commit(jobs_state()).unwrap();
    drop(store);

    let fresh: FileSnapshotStore<Job> = FileSnapshotStore::new(&path);
    assert_eq!(fresh.load().unwrap(), jobs_state());
}

#[test]
fn fresh_instance_diffs_against_what_the_old_one_committed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");

    let mut store = FileSnapshotStore::new(&path);
    store.commit(jobs_state()).unwrap();
    drop(store);

    // Same snapshot file, new process: a title change surfaces as one
    // update.
    let mut current = jobs_state();
    current.insert(
        "req-100".to_string(),
        job("Staff Rust Engineer", Some("Remote")),
    );

    let mut fresh = FileSnapshotStore::new(&path);
    let changes = fresh.commit(current).unwrap();
    assert!(changes.created.is_empty());
    assert!(changes.deleted.is_empty());
    assert_eq!(changes.updated.len(), 1);
    assert_eq!(changes.updated[0].key, "req-100");
    assert_eq!(changes.updated[0].before.title, "Rust Engineer");
    assert_eq!(changes.updated[0].after.title, "Staff Rust Engineer");
}

#[test]
fn stale_temp_file_does_not_confuse_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");

    let mut store = FileSnapshotStore::new(&path);
    store.commit(jobs_state()).unwrap();

    // Simulate a crash that left a torn temp file behind.
    std::fs::write(path.with_extension("tmp"), b"{ torn").unwrap();

    assert_eq!(store.load().unwrap(), jobs_state());
    store.commit(jobs_state()).unwrap();
    assert_eq!(store.load().unwrap(), jobs_state());
}

#[test]
fn corrupt_snapshot_is_fatal_not_silently_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, b"\"version\": 1").unwrap();

    let mut store: FileSnapshotStore<Job> = FileSnapshotStore::new(&path);
    assert!(matches!(
        store.load().unwrap_err(),
        StorageError::Malformed { .. }
    ));
    // commit must refuse too: the previous state cannot be trusted.
    assert!(matches!(
        store.commit(jobs_state()).unwrap_err(),
        StorageError::Malformed { .. }
    ));
    // The corrupt file was not replaced.
    assert_eq!(std::fs::read(&path).unwrap(), b"\"version\": 1");
}
