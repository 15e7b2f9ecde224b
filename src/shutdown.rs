//! Cooperative shutdown signaling.
//!
//! Shutdown is signaled by closing a channel: the [`ShutdownSignal`] owns
//! the only sender and never sends through it; observers detect the request
//! as a disconnect. This makes the signal usable both as an instantaneous
//! check and as a cancellable sleep, with no polling flag to forget.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Owner side of the shutdown channel. Dropping it also triggers shutdown.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: Option<Sender<()>>,
    rx: Receiver<()>,
}

impl ShutdownSignal {
    /// Creates an untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self { tx: Some(tx), rx }
    }

    /// A new observer watching this signal.
    #[must_use]
    pub fn observer(&self) -> ShutdownObserver {
        ShutdownObserver {
            rx: self.rx.clone(),
        }
    }

    /// Requests shutdown. Idempotent.
    pub fn trigger(&mut self) {
        self.tx = None;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of the shutdown channel.
#[derive(Debug, Clone)]
pub struct ShutdownObserver {
    rx: Receiver<()>,
}

impl ShutdownObserver {
    /// True once shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Blocks for up to `timeout`, returning true if shutdown was requested
    /// before the timeout elapsed.
    #[must_use]
    pub fn wait(&self, timeout: Duration) -> bool {
        matches!(
            self.rx.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}
