//! Shutdown coordination for the server.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Bounded drain deadline for in-flight requests.
pub const DRAIN_DEADLINE: Duration = Duration::from_secs(15);

/// Failure modes while waiting for the server task to drain. Both are logged
/// and never re-thrown; the process is exiting either way.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    /// In-flight requests outlived the drain deadline and were abandoned.
    #[error("graceful shutdown deadline of {0:?} exceeded; abandoning in-flight requests")]
    Timeout(Duration),

    /// The server task itself failed (panicked or was cancelled).
    #[error("server task failed during shutdown: {0}")]
    TaskFailed(#[source] tokio::task::JoinError),
}

/// Wait for the server task to finish draining, bounded by `deadline`.
///
/// On expiry the task is abandoned: the handle is dropped and whatever is
/// still in flight never completes, which is the documented contract for
/// requests that outlive the deadline.
pub async fn drain(task: JoinHandle<()>, deadline: Duration) -> Result<(), ShutdownError> {
    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ShutdownError::TaskFailed(err)),
        Err(_) => Err(ShutdownError::Timeout(deadline)),
    }
}

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
