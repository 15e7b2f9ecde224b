//! Single-source polling loop.
//!
//! A monitor owns one fetcher, one snapshot store, and one action executor,
//! and drives the fetch → commit → report cycle at a fixed interval until
//! shutdown is observed. Failures are isolated per cycle: a failed fetch is
//! reported and retried next interval, a failed report is logged and
//! swallowed. Only storage corruption stops the loop, and it stops this
//! monitor alone.

use std::time::Duration;

use chrono::Local;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::fetch::Fetcher;
use crate::report::ActionExecutor;
use crate::shutdown::ShutdownObserver;
use crate::snapshot::SnapshotStore;
use crate::state::Item;

/// One independently scheduled monitoring unit.
pub struct Monitor<T: Item> {
    name: String,
    fetcher: Box<dyn Fetcher<Item = T>>,
    store: Box<dyn SnapshotStore<T>>,
    executor: Box<dyn ActionExecutor<T>>,
    interval: Duration,
}

impl<T: Item> Monitor<T> {
    /// Assembles a monitor from its collaborators.
    pub fn new(
        name: impl Into<String>,
        fetcher: Box<dyn Fetcher<Item = T>>,
        store: Box<dyn SnapshotStore<T>>,
        executor: Box<dyn ActionExecutor<T>>,
        interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            fetcher,
            store,
            executor,
            interval,
        }
    }

    /// The source's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs the polling loop until shutdown is observed.
    ///
    /// Shutdown is checked before every cycle and during every interval
    /// sleep; a cycle already past its fetch completes its commit atomically
    /// before the loop exits.
    ///
    /// # Errors
    /// [`StorageError`] if the snapshot record is corrupt or cannot be
    /// replaced. Fatal for this source only; the caller decides how to
    /// surface it.
    pub fn run(&mut self, shutdown: &ShutdownObserver) -> Result<(), StorageError> {
        debug!(source = %self.name, interval = ?self.interval, "monitor started");
        loop {
            if shutdown.is_triggered() {
                break;
            }
            self.cycle()?;
            if shutdown.wait(self.interval) {
                break;
            }
        }
        debug!(source = %self.name, "monitor stopped");
        Ok(())
    }

    /// Executes one fetch → commit → report cycle.
    ///
    /// The report is issued strictly after a successful commit, so a
    /// notification is never emitted for state that failed to become
    /// durable.
    fn cycle(&mut self) -> Result<(), StorageError> {
        let at = Local::now();

        match self.fetcher.fetch() {
            Ok(current) => {
                let changes = self.store.commit(current)?;
                debug!(source = %self.name, operations = changes.len(), "cycle committed");
                if let Err(err) = self.executor.report(&self.name, at, &changes) {
                    warn!(source = %self.name, error = %err, "change report failed");
                }
            }
            Err(err) => {
                debug!(source = %self.name, error = %err, "fetch failed");
                if let Err(report_err) = self.executor.report_error(&self.name, at, err.message()) {
                    warn!(source = %self.name, error = %report_err, "error report failed");
                }
            }
        }

        Ok(())
    }
}

/// Object-safe view of a monitor, independent of its item type. Lets the
/// deployer schedule sources with heterogeneous item types uniformly.
pub(crate) trait MonitorTask: Send {
    fn name(&self) -> &str;
    fn run(&mut self, shutdown: &ShutdownObserver) -> Result<(), StorageError>;
}

impl<T: Item> MonitorTask for Monitor<T> {
    fn name(&self) -> &str {
        Monitor::name(self)
    }

    fn run(&mut self, shutdown: &ShutdownObserver) -> Result<(), StorageError> {
        Monitor::run(self, shutdown)
    }
}
