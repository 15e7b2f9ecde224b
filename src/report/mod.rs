//! Change reporting.
//!
//! An action executor consumes the outcome of one monitoring cycle — a
//! change set or a fetch failure — and acts on it. The standard
//! implementation, [`TerminalReporter`], renders colorized blocks onto the
//! deployer's shared console; alternative executors (log files, webhooks)
//! only need to implement the trait.

mod highlight;
mod terminal;

pub use highlight::HighlightRenderer;
pub use terminal::TerminalReporter;

pub(crate) use terminal::error_banner;

use chrono::{DateTime, Local};

use crate::diff::ChangeSet;
use crate::error::ReportError;

/// Renders one item for display. Supplied per source.
pub type Renderer<T> = Box<dyn Fn(&T) -> String + Send>;

/// Consumes the outcome of one monitoring cycle.
pub trait ActionExecutor<T>: Send {
    /// Report the changes of a successful cycle.
    ///
    /// Invoked on every successful cycle, including when `changes` is empty;
    /// what to do with an empty set is the executor's choice.
    ///
    /// # Errors
    /// Delivery failures. The monitor logs and swallows them — a lost
    /// notification never stops the loop.
    fn report(
        &mut self,
        source: &str,
        at: DateTime<Local>,
        changes: &ChangeSet<T>,
    ) -> Result<(), ReportError>;

    /// Report a failed fetch.
    ///
    /// # Errors
    /// Delivery failures, handled as for [`ActionExecutor::report`].
    fn report_error(
        &mut self,
        source: &str,
        at: DateTime<Local>,
        message: &str,
    ) -> Result<(), ReportError>;
}
