//! Graceful shutdown coordination.
//!
//! One [`Shutdown`] is shared by every server task. Each task awaits
//! [`Shutdown::wait`] as its shutdown future; [`Shutdown::trigger`] or an OS
//! signal (SIGINT, SIGTERM) releases all of them at once.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Clone)]
pub struct Shutdown {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Initiate shutdown. Idempotent.
    pub fn trigger(&self) {
        self.sender.send_if_modified(|initiated| {
            if *initiated {
                return false;
            }
            tracing::info!("Shutdown initiated");
            *initiated = true;
            true
        });
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once shutdown has been triggered.
    pub async fn wait(&self) {
        let mut receiver = self.receiver.clone();
        // Sender is owned by self; the channel cannot close here.
        let _ = receiver.wait_for(|initiated| *initiated).await;
    }

    /// Trigger shutdown on SIGINT or SIGTERM.
    ///
    /// # Errors
    /// Signal handlers could not be registered
    pub async fn listen_for_signals(&self) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::signal;
            use tokio::signal::unix::SignalKind;

            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;

            tokio::select! {
                _ = sigterm.recv() => tracing::info!(signal = "SIGTERM", "Signal received"),
                _ = sigint.recv() => tracing::info!(signal = "SIGINT", "Signal received"),
                _ = self.wait() => return Ok(()),
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    result?;
                    tracing::info!(signal = "ctrl_c", "Signal received");
                }
                _ = self.wait() => return Ok(()),
            }
        }

        self.trigger();
        Ok(())
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
