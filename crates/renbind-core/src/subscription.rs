//! Background producer tasks with a quit signal and an error channel.
//!
//! A [`Subscription`] owns one Tokio task. The task receives a quit signal
//! and runs until it returns; a returned error is delivered once on
//! [`Subscription::err`]. Log filters, log watches and typed event watches
//! are all built on this.

use std::future::Future;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::BindError;

/// Quit signal handed to a producer. Resolves on `unsubscribe()` or when the
/// [`Subscription`] is dropped.
pub type Quit = oneshot::Receiver<()>;

/// Handle to a running producer task.
pub struct Subscription {
    quit: Option<oneshot::Sender<()>>,
    err: mpsc::Receiver<BindError>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Start `producer` on the Tokio runtime.
    pub fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(Quit) -> Fut,
        Fut: Future<Output = Result<(), BindError>> + Send + 'static,
    {
        let (quit_tx, quit_rx) = oneshot::channel();
        let (err_tx, err_rx) = mpsc::channel(1);
        let fut = producer(quit_rx);
        let task = tokio::spawn(async move {
            if let Err(e) = fut.await {
                tracing::debug!(error = %e, "subscription ended with error");
                let _ = err_tx.send(e).await;
            }
        });
        Self {
            quit: Some(quit_tx),
            err: err_rx,
            task: Some(task),
        }
    }

    /// Stop the producer and wait for it to exit. Safe to call repeatedly.
    pub async fn unsubscribe(&mut self) {
        if let Some(quit) = self.quit.take() {
            let _ = quit.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Wait for the producer's failure.
    ///
    /// Returns `None` once the producer has exited without error (or after
    /// the error has already been taken).
    pub async fn err(&mut self) -> Option<BindError> {
        self.err.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(quit) = self.quit.take() {
            let _ = quit.send(());
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.quit.is_some())
            .finish()
    }
}
