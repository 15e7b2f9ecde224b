//! Error types for lookout.
//!
//! All errors are strongly typed using thiserror. The taxonomy mirrors how
//! failures propagate: fetch errors are transient and contained per cycle,
//! storage errors are fatal for one source, configuration errors are fatal
//! before anything runs, and reporting errors are swallowed by the monitor.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failed retrieval from an external data source.
///
/// Fetch errors are transient and source-scoped: the monitor reports them
/// and retries at the next interval. The previous snapshot stays
/// authoritative.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    /// Creates a fetch error from a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A failure of the durable snapshot record.
///
/// Storage errors are fatal for the affected source only: its monitor stops
/// and the deployer surfaces the failure. They are never retried — the
/// snapshot file needs operator intervention.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The snapshot file exists but cannot be read.
    #[error("snapshot {} is unreadable: {source}", .path.display())]
    Unreadable {
        /// Path of the snapshot file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The snapshot file exists but does not parse.
    #[error("snapshot {} is malformed: {reason}", .path.display())]
    Malformed {
        /// Path of the snapshot file.
        path: PathBuf,
        /// Parse failure detail.
        reason: String,
    },

    /// The snapshot file was written by an incompatible format version.
    #[error("snapshot {} has unsupported format version {found} (expected {expected})", .path.display())]
    UnsupportedVersion {
        /// Path of the snapshot file.
        path: PathBuf,
        /// Version found in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// The state could not be encoded for persistence.
    #[error("failed to encode snapshot {}: {reason}", .path.display())]
    Encode {
        /// Path of the snapshot file.
        path: PathBuf,
        /// Serialization failure detail.
        reason: String,
    },

    /// The atomic replace of the snapshot file failed.
    ///
    /// The previous snapshot is still intact on disk.
    #[error("failed to persist snapshot {}: {source}", .path.display())]
    WriteFailed {
        /// Path of the snapshot file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// An invalid deployment configuration.
///
/// Raised by [`DeployerBuilder::build`](crate::deploy::DeployerBuilder::build)
/// before any monitor runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No sources were registered.
    #[error("no sources configured")]
    NoSources,

    /// Two sources share a name.
    #[error("duplicate source name: {name}")]
    DuplicateName {
        /// The offending name.
        name: String,
    },

    /// Two sources share a snapshot file.
    #[error("duplicate snapshot path: {}", .path.display())]
    DuplicateSnapshotPath {
        /// The offending path.
        path: PathBuf,
    },

    /// A source was configured with a zero poll interval.
    #[error("source '{name}' has a zero poll interval")]
    ZeroInterval {
        /// The offending source.
        name: String,
    },

    /// A highlight term set could not be compiled.
    #[error("invalid highlight terms: {reason}")]
    InvalidHighlight {
        /// Compile failure detail.
        reason: String,
    },
}

/// A failed report delivery.
///
/// Caught and logged by the monitor; losing one notification is less severe
/// than losing the whole monitor, so the cycle proceeds.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The console writer is gone.
    #[error("console channel is disconnected")]
    Disconnected,

    /// Executor-specific failure.
    #[error("{message}")]
    Other {
        /// The failure message.
        message: String,
    },
}

impl ReportError {
    /// Creates an executor-specific report error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Terminal record of a monitor that stopped before shutdown was requested.
#[derive(Debug, Error)]
pub enum SourceFailure {
    /// The monitor stopped on a storage error.
    #[error("source '{name}' stopped on storage error: {source}")]
    Storage {
        /// The source's name.
        name: String,
        /// The storage error that stopped it.
        #[source]
        source: StorageError,
    },

    /// The monitor thread panicked.
    #[error("source '{name}' panicked")]
    Panicked {
        /// The source's name.
        name: String,
    },
}

/// A deployment-level failure from [`Deployer::run`](crate::deploy::Deployer::run).
#[derive(Debug, Error)]
pub enum DeployError {
    /// The interactive terminal could not be set up or read.
    #[error("terminal setup failed: {source}")]
    Terminal {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// One or more sources stopped before shutdown was requested.
    ///
    /// Returned after an otherwise orderly shutdown so the embedder can see
    /// which sources need operator intervention.
    #[error("{} source(s) stopped before shutdown", .failures.len())]
    SourcesFailed {
        /// Per-source failure records.
        failures: Vec<SourceFailure>,
    },
}

/// Top-level error type for lookout.
#[derive(Debug, Error)]
pub enum LookoutError {
    /// A fetch failure.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A snapshot storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An invalid deployment configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A report delivery failure.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// A deployment-level failure.
    #[error("deploy error: {0}")]
    Deploy(#[from] DeployError),
}

/// Result type alias for lookout operations.
pub type LookoutResult<T> = Result<T, LookoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_message() {
        let err = FetchError::new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn storage_error_mentions_path() {
        let err = StorageError::Malformed {
            path: PathBuf::from("/tmp/jobs.json"),
            reason: "unexpected end of input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/jobs.json"));
        assert!(msg.contains("unexpected end of input"));
    }

    #[test]
    fn config_error_names_source() {
        let err = ConfigError::ZeroInterval {
            name: "jobs".to_string(),
        };
        assert!(err.to_string().contains("jobs"));
    }

    #[test]
    fn deploy_error_counts_failures() {
        let err = DeployError::SourcesFailed {
            failures: vec![SourceFailure::Panicked {
                name: "jobs".to_string(),
            }],
        };
        assert!(err.to_string().contains("1 source(s)"));
    }

    #[test]
    fn lookout_error_wraps_variants() {
        let err: LookoutError = FetchError::new("boom").into();
        assert!(matches!(err, LookoutError::Fetch(_)));

        let err: LookoutError = ConfigError::NoSources.into();
        assert!(matches!(err, LookoutError::Config(_)));
    }
}
