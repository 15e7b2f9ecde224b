//! Standard terminal reporter.
//!
//! Renders one complete text block per cycle and hands it to the shared
//! console, so output from concurrent sources never interleaves. Block
//! structure:
//!
//! ```text
//! Changes for <source> [<timestamp>]
//! Created:
//!   * <key>: <item>
//! Deleted:
//!   * <key>: <item>
//! Updated:
//!   * <key>:
//!     from: <item>
//!     to:   <item>
//! ```
//!
//! Sections are omitted when empty; an entirely empty change set renders
//! nothing at all.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use crossterm::style::Stylize;

use crate::console::ConsoleHandle;
use crate::diff::ChangeSet;
use crate::error::ReportError;
use crate::report::{ActionExecutor, Renderer};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Standard [`ActionExecutor`] rendering to the shared console.
pub struct TerminalReporter<T> {
    renderer: Renderer<T>,
    console: ConsoleHandle,
}

impl<T> TerminalReporter<T> {
    /// Creates a reporter rendering items with `renderer` and writing to
    /// `console`.
    pub fn new(renderer: Renderer<T>, console: ConsoleHandle) -> Self {
        Self { renderer, console }
    }
}

impl<T: Send> ActionExecutor<T> for TerminalReporter<T> {
    fn report(
        &mut self,
        source: &str,
        at: DateTime<Local>,
        changes: &ChangeSet<T>,
    ) -> Result<(), ReportError> {
        if changes.is_empty() {
            return Ok(());
        }
        self.console
            .write_block(render_changes(source, at, changes, &self.renderer))
    }

    fn report_error(
        &mut self,
        source: &str,
        at: DateTime<Local>,
        message: &str,
    ) -> Result<(), ReportError> {
        self.console.write_block(error_banner(source, at, message))
    }
}

fn render_changes<T>(
    source: &str,
    at: DateTime<Local>,
    changes: &ChangeSet<T>,
    renderer: &Renderer<T>,
) -> String {
    let mut block = String::new();
    let _ = writeln!(
        block,
        "{}",
        format!("Changes for {source} [{}]", at.format(TIMESTAMP_FORMAT)).bold()
    );

    if !changes.created.is_empty() {
        let _ = writeln!(block, "{}", "Created:".green());
        for (key, item) in &changes.created {
            let _ = writeln!(block, "  * {key}: {}", (renderer)(item));
        }
    }
    if !changes.deleted.is_empty() {
        let _ = writeln!(block, "{}", "Deleted:".red());
        for (key, item) in &changes.deleted {
            let _ = writeln!(block, "  * {key}: {}", (renderer)(item));
        }
    }
    if !changes.updated.is_empty() {
        let _ = writeln!(block, "{}", "Updated:".yellow());
        for update in &changes.updated {
            let _ = writeln!(block, "  * {}:", update.key);
            let _ = writeln!(block, "    from: {}", (renderer)(&update.before));
            let _ = writeln!(block, "    to:   {}", (renderer)(&update.after));
        }
    }

    block
}

/// Renders the banner for a failed cycle.
pub(crate) fn error_banner(source: &str, at: DateTime<Local>, message: &str) -> String {
    format!(
        "{}\n",
        format!(
            "Error for {source} [{}]: {message}",
            at.format(TIMESTAMP_FORMAT)
        )
        .red()
    )
}
