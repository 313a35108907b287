//! Cooperative cancellation driven by SIGINT/SIGTERM.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Single-shot cancellation flag shared between the signal task and the pipeline.
///
/// Clones observe the same flag. Once triggered it never resets.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    triggered: Arc<Mutex<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        let mut triggered = self.triggered.lock().unwrap_or_else(PoisonError::into_inner);
        let first = !*triggered;
        *triggered = true;
        first
    }

    pub fn is_cancelled(&self) -> bool {
        *self.triggered.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Install SIGINT/SIGTERM handlers, then spawn a task that cancels `token` on the first one.
///
/// Handlers are in place when this returns. Later signals are absorbed so an
/// in-flight request can still finish.
pub fn spawn_signal_listener(token: CancellationToken) -> io::Result<JoinHandle<()>> {
    let mut signals = TerminationSignals::install()?;

    Ok(tokio::spawn(async move {
        loop {
            if signals.recv().await.is_none() {
                warn!("Termination signal stream closed; Ctrl+C will no longer be observed");
                return;
            }

            if token.cancel() {
                println!("\nCtrl+C received. Shutting down gracefully...");
            } else {
                debug!("Termination signal received again; already shutting down");
            }
        }
    }))
}

#[cfg(unix)]
struct TerminationSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> Option<()> {
        tokio::select! {
            received = self.interrupt.recv() => received,
            received = self.terminate.recv() => received,
        }
    }
}

#[cfg(windows)]
struct TerminationSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
    ctrl_close: tokio::signal::windows::CtrlClose,
}

#[cfg(windows)]
impl TerminationSignals {
    fn install() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
            ctrl_close: tokio::signal::windows::ctrl_close()?,
        })
    }

    async fn recv(&mut self) -> Option<()> {
        tokio::select! {
            received = self.ctrl_c.recv() => received,
            received = self.ctrl_close.recv() => received,
        }
    }
}
