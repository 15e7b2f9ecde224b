//! Operator key controls.
//!
//! While the deployment runs, the terminal stays in raw mode and a listener
//! on the calling thread interprets exactly two controls:
//!
//! - Ctrl+L — clear the visible screen (monitor state untouched)
//! - Ctrl+D / Ctrl+C — graceful shutdown of the whole deployment
//!
//! Everything else is ignored.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

use crate::console::ConsoleHandle;

/// How long each poll for terminal input blocks.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Puts the terminal into raw mode for the guard's lifetime.
///
/// Raw mode delivers control keys as plain key events instead of signals or
/// line-buffered input. The original mode is restored on drop, on every exit
/// path.
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    pub(crate) fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Blocks interpreting key controls until shutdown is requested.
///
/// Returns `Ok(())` once a shutdown key was pressed; clear requests are
/// forwarded to the console as they arrive.
pub(crate) fn listen(console: &ConsoleHandle) -> io::Result<()> {
    loop {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press || !key.modifiers.contains(KeyModifiers::CONTROL) {
            continue;
        }

        match key.code {
            KeyCode::Char('l') => {
                debug!("clear screen requested");
                let _ = console.clear();
            }
            KeyCode::Char('d') | KeyCode::Char('c') => {
                debug!("shutdown requested by operator");
                let _ = console.write_block("\nShutting down...\n");
                return Ok(());
            }
            _ => {}
        }
    }
}
