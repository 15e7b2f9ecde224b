//! Directory-watching demo deployment.
//!
//! Watches one or more local directories and reports file creations,
//! deletions, and size/mtime changes on the terminal:
//!
//! ```text
//! lookout-watch <dir> [<dir> ...]
//! ```
//!
//! Snapshots are kept next to each watched directory as
//! `<dir>.lookout.json`. Ctrl+L clears the screen, Ctrl+D or Ctrl+C shuts
//! down.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use lookout::{Deployer, DirectoryFetcher, FileEntry, SourceSpec};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

fn render_entry(entry: &FileEntry) -> String {
    match entry.modified_epoch_secs {
        Some(epoch) => format!("{} bytes, modified @{epoch}", entry.size_bytes),
        None => format!("{} bytes", entry.size_bytes),
    }
}

fn snapshot_path_for(dir: &PathBuf) -> PathBuf {
    let mut raw = dir.clone().into_os_string();
    raw.push(".lookout.json");
    PathBuf::from(raw)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let dirs: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if dirs.is_empty() {
        eprintln!("usage: lookout-watch <dir> [<dir> ...]");
        return ExitCode::FAILURE;
    }

    let mut builder = Deployer::builder();
    for dir in &dirs {
        let name = dir
            .file_name()
            .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned());
        builder = builder.source(SourceSpec::new(
            name,
            DirectoryFetcher::new(dir),
            render_entry,
            snapshot_path_for(dir),
            POLL_INTERVAL,
        ));
    }

    let deployer = match builder.build() {
        Ok(deployer) => deployer,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match deployer.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
