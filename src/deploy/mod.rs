//! Multi-source deployment and orchestration.
//!
//! The deployer is the single root owning every monitor lifetime, the shared
//! console, and the operator controls. Each registered source becomes one
//! dedicated monitor thread; all their output is serialized through the
//! console writer; the calling thread runs the key controller until the
//! operator requests shutdown, after which every thread is joined before
//! [`Deployer::run`] returns.

mod keys;

use std::collections::HashSet;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use tracing::{error, info};

use crate::console::{Console, ConsoleConfig, ConsoleHandle};
use crate::error::{ConfigError, DeployError, SourceFailure, StorageError};
use crate::fetch::Fetcher;
use crate::monitor::{Monitor, MonitorTask};
use crate::report::{error_banner, Renderer, TerminalReporter};
use crate::shutdown::{ShutdownObserver, ShutdownSignal};
use crate::snapshot::FileSnapshotStore;
use crate::state::Item;

/// Configuration of one monitored source.
///
/// All fields are mandatory; the interval must be positive (validated by
/// [`DeployerBuilder::build`]).
pub struct SourceSpec<T: Item> {
    name: String,
    fetcher: Box<dyn Fetcher<Item = T>>,
    renderer: Renderer<T>,
    snapshot_path: PathBuf,
    interval: Duration,
}

impl<T: Item> SourceSpec<T> {
    /// Describes one source to monitor.
    pub fn new(
        name: impl Into<String>,
        fetcher: impl Fetcher<Item = T> + 'static,
        renderer: impl Fn(&T) -> String + Send + 'static,
        snapshot_path: impl Into<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            fetcher: Box::new(fetcher),
            renderer: Box::new(renderer),
            snapshot_path: snapshot_path.into(),
            interval,
        }
    }
}

/// A validated-later source entry: the identity fields used for validation,
/// plus a factory producing the monitor once the console exists.
struct PendingSource {
    name: String,
    snapshot_path: PathBuf,
    interval: Duration,
    build: Box<dyn FnOnce(ConsoleHandle) -> Box<dyn MonitorTask> + Send>,
}

/// Builder collecting [`SourceSpec`]s of heterogeneous item types.
#[derive(Default)]
pub struct DeployerBuilder {
    sources: Vec<PendingSource>,
}

impl DeployerBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one source.
    #[must_use]
    pub fn source<T: Item>(mut self, spec: SourceSpec<T>) -> Self {
        let SourceSpec {
            name,
            fetcher,
            renderer,
            snapshot_path,
            interval,
        } = spec;

        let monitor_name = name.clone();
        let store_path = snapshot_path.clone();
        self.sources.push(PendingSource {
            name,
            snapshot_path,
            interval,
            build: Box::new(move |console| {
                Box::new(Monitor::new(
                    monitor_name,
                    fetcher,
                    Box::new(FileSnapshotStore::<T>::new(store_path)),
                    Box::new(TerminalReporter::new(renderer, console)),
                    interval,
                ))
            }),
        });
        self
    }

    /// Validates the configuration and constructs the deployer.
    ///
    /// # Errors
    /// [`ConfigError`] if no source is registered, a name or snapshot path
    /// is duplicated, or an interval is zero. Nothing has started when this
    /// fails.
    pub fn build(self) -> Result<Deployer, ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for source in &self.sources {
            if source.interval.is_zero() {
                return Err(ConfigError::ZeroInterval {
                    name: source.name.clone(),
                });
            }
            if !names.insert(source.name.clone()) {
                return Err(ConfigError::DuplicateName {
                    name: source.name.clone(),
                });
            }
            if !paths.insert(source.snapshot_path.clone()) {
                return Err(ConfigError::DuplicateSnapshotPath {
                    path: source.snapshot_path.clone(),
                });
            }
        }

        Ok(Deployer {
            sources: self.sources,
        })
    }
}

/// Runs a named collection of monitors concurrently against one shared
/// interactive terminal.
pub struct Deployer {
    sources: Vec<PendingSource>,
}

impl std::fmt::Debug for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl Deployer {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> DeployerBuilder {
        DeployerBuilder::new()
    }

    /// Runs every monitor plus the key controller until shutdown.
    ///
    /// Blocks until the operator requests shutdown (Ctrl+D or Ctrl+C), then
    /// waits for every monitor to finish its current cycle and exit, drains
    /// the console, and restores the terminal.
    ///
    /// # Errors
    /// [`DeployError::Terminal`] if the interactive terminal cannot be set
    /// up or read; [`DeployError::SourcesFailed`] if any source stopped on a
    /// storage error (or panicked) before shutdown was requested — returned
    /// only after the orderly shutdown completes.
    pub fn run(self) -> Result<(), DeployError> {
        let raw_guard =
            keys::RawModeGuard::enable().map_err(|source| DeployError::Terminal { source })?;
        let console = Console::stdout(ConsoleConfig {
            crlf: true,
            ..ConsoleConfig::default()
        });
        let mut shutdown = ShutdownSignal::new();

        let mut handles = Vec::with_capacity(self.sources.len());
        for source in self.sources {
            let PendingSource { name, build, .. } = source;
            let task = (build)(console.handle());
            let observer = shutdown.observer();
            let diagnostics = console.handle();
            let handle = thread::Builder::new()
                .name(format!("lookout-{name}"))
                .spawn(move || run_source(task, &observer, &diagnostics))
                .expect("failed to spawn lookout monitor thread");
            handles.push((name, handle));
        }
        info!(sources = handles.len(), "deployment started");

        // Operator controls run on the calling thread until shutdown is
        // requested; monitors keep polling meanwhile.
        let controls = keys::listen(&console.handle());

        shutdown.trigger();
        info!("shutdown requested, waiting for monitors");

        let failures = join_monitors(handles);
        console.close();
        drop(raw_guard);

        if let Err(source) = controls {
            return Err(DeployError::Terminal { source });
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DeployError::SourcesFailed { failures })
        }
    }
}

/// Body of one monitor thread: run the loop, and on a storage failure leave
/// a visible diagnostic on the console before the thread ends.
fn run_source(
    mut task: Box<dyn MonitorTask>,
    shutdown: &ShutdownObserver,
    diagnostics: &ConsoleHandle,
) -> Result<(), StorageError> {
    let result = task.run(shutdown);
    if let Err(err) = &result {
        error!(source = task.name(), error = %err, "monitor stopped on storage error");
        let _ = diagnostics.write_block(error_banner(task.name(), Local::now(), &err.to_string()));
    }
    result
}

fn join_monitors(
    handles: Vec<(String, JoinHandle<Result<(), StorageError>>)>,
) -> Vec<SourceFailure> {
    let mut failures = Vec::new();
    for (name, handle) in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(source)) => failures.push(SourceFailure::Storage { name, source }),
            Err(_) => {
                error!(source = %name, "monitor thread panicked");
                failures.push(SourceFailure::Panicked { name });
            }
        }
    }
    failures
}
