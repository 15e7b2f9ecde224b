//! Serialized terminal sink shared by all monitors.
//!
//! Monitors never touch the terminal directly. Every report is rendered to a
//! fully-formed text block and handed over one bounded channel to a single
//! dedicated writer thread: one block, one write, so concurrent reports can
//! never interleave mid-message. Blocks are written in arrival order —
//! first-ready, first-written, no priority among sources.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;

use crate::error::ReportError;

#[derive(Debug)]
enum ConsoleMsg {
    /// One atomic block of output.
    Block(String),
    /// Erase the visible screen.
    Clear,
    /// Stop the writer after draining everything queued before this.
    Shutdown,
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Max queued blocks before senders block (backpressure).
    pub queue_capacity: usize,
    /// Convert `\n` to `\r\n` on the way out. Required while the terminal is
    /// in raw mode, where bare line feeds do not return the carriage.
    pub crlf: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            crlf: false,
        }
    }
}

/// Cloneable handle for submitting output to the console.
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    tx: Sender<ConsoleMsg>,
}

impl ConsoleHandle {
    /// Queue one atomic block of output.
    ///
    /// Blocks briefly if the writer is behind.
    ///
    /// # Errors
    /// [`ReportError::Disconnected`] if the writer has shut down.
    pub fn write_block(&self, block: impl Into<String>) -> Result<(), ReportError> {
        self.tx
            .send(ConsoleMsg::Block(block.into()))
            .map_err(|_| ReportError::Disconnected)
    }

    /// Request a screen clear.
    ///
    /// # Errors
    /// [`ReportError::Disconnected`] if the writer has shut down.
    pub fn clear(&self) -> Result<(), ReportError> {
        self.tx
            .send(ConsoleMsg::Clear)
            .map_err(|_| ReportError::Disconnected)
    }
}

/// The deployer-owned write side of the shared terminal.
///
/// Owns the writer worker thread. [`Console::close`] drains queued output
/// and joins the worker; if the console is simply dropped, the worker exits
/// on its own once every handle is gone.
pub struct Console {
    tx: Sender<ConsoleMsg>,
    writer: Option<JoinHandle<()>>,
}

impl Console {
    /// Starts a writer worker targeting stdout.
    #[must_use]
    pub fn stdout(cfg: ConsoleConfig) -> Self {
        Self::with_sink(cfg, Box::new(io::stdout()))
    }

    /// Starts a writer worker targeting an arbitrary sink.
    #[must_use]
    pub fn with_sink(cfg: ConsoleConfig, sink: Box<dyn Write + Send>) -> Self {
        let (tx, rx) = bounded::<ConsoleMsg>(cfg.queue_capacity.max(1));
        let crlf = cfg.crlf;
        let writer = thread::Builder::new()
            .name("lookout-console".to_string())
            .spawn(move || writer_loop(&rx, sink, crlf))
            .expect("failed to spawn lookout console writer");

        Self {
            tx,
            writer: Some(writer),
        }
    }

    /// A new handle for submitting output.
    #[must_use]
    pub fn handle(&self) -> ConsoleHandle {
        ConsoleHandle {
            tx: self.tx.clone(),
        }
    }

    /// Drains queued output and stops the writer.
    ///
    /// Output already queued is written before the writer exits; submissions
    /// from outstanding [`ConsoleHandle`]s fail with
    /// [`ReportError::Disconnected`] afterwards.
    pub fn close(self) {
        let Self { tx, writer } = self;
        let _ = tx.send(ConsoleMsg::Shutdown);
        drop(tx);
        if let Some(handle) = writer {
            let _ = handle.join();
        }
    }
}

fn writer_loop(rx: &Receiver<ConsoleMsg>, mut sink: Box<dyn Write + Send>, crlf: bool) {
    while let Ok(msg) = rx.recv() {
        let outcome = match msg {
            ConsoleMsg::Block(block) => write_block(&mut sink, &block, crlf),
            ConsoleMsg::Clear => clear_screen(&mut sink),
            ConsoleMsg::Shutdown => break,
        };
        if let Err(err) = outcome {
            warn!(error = %err, "console write failed");
        }
    }
}

fn write_block(sink: &mut Box<dyn Write + Send>, block: &str, crlf: bool) -> io::Result<()> {
    if crlf {
        sink.write_all(block.replace('\n', "\r\n").as_bytes())?;
    } else {
        sink.write_all(block.as_bytes())?;
    }
    sink.flush()
}

fn clear_screen(sink: &mut Box<dyn Write + Send>) -> io::Result<()> {
    queue!(sink, Clear(ClearType::All), MoveTo(0, 0))?;
    sink.flush()
}
