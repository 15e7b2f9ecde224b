//! # Lookout — change monitoring for arbitrary data sources
//!
//! Lookout periodically polls external data sources, diffs each fresh state
//! against the last known snapshot, and reports what changed. Many sources
//! run concurrently, multiplexed onto one shared interactive terminal with
//! live operator controls (Ctrl+L clears the screen, Ctrl+D or Ctrl+C shuts
//! everything down gracefully).
//!
//! ## Core Concepts
//!
//! - **State**: a complete key → item snapshot of one source at one instant
//! - **ChangeSet**: the Create/Delete/Update operations between two states
//! - **Fetcher**: pluggable retrieval of a source's current state
//! - **Monitor**: one fetch → commit → report loop per source
//! - **Deployer**: runs every monitor against the shared terminal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use lookout::{Deployer, DirectoryFetcher, SourceSpec};
//!
//! let deployer = Deployer::builder()
//!     .source(SourceSpec::new(
//!         "downloads",
//!         DirectoryFetcher::new("/home/me/Downloads"),
//!         |entry: &lookout::FileEntry| format!("{} bytes", entry.size_bytes),
//!         "/var/lib/lookout/downloads.json",
//!         Duration::from_secs(60),
//!     ))
//!     .build()?;
//!
//! deployer.run()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod deploy;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod monitor;
pub mod report;
pub mod shutdown;
pub mod snapshot;
pub mod state;

// Re-export primary types at crate root for convenience
pub use console::{Console, ConsoleConfig, ConsoleHandle};
pub use deploy::{Deployer, DeployerBuilder, SourceSpec};
pub use diff::{diff, ChangeSet, Update};
pub use error::{
    ConfigError, DeployError, FetchError, LookoutError, LookoutResult, ReportError, SourceFailure,
    StorageError,
};
pub use fetch::{DirectoryFetcher, Fetcher, FileEntry, FnFetcher};
pub use monitor::Monitor;
pub use report::{ActionExecutor, HighlightRenderer, Renderer, TerminalReporter};
pub use shutdown::{ShutdownObserver, ShutdownSignal};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use state::{Item, ItemKey, State};
