//! Fetch tasks bound to the lifetime of the view that started them.
//!
//! A [`ViewScope`] owns a cancellation signal. Tasks spawned through it
//! race their work against that signal and hand their outcome back over a
//! oneshot channel. Dropping the scope cancels every task it spawned, so
//! nothing keeps running for a view that is gone.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::{oneshot, watch};

/// The owning view went away before the task finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Task cancelled: its view is gone")]
pub struct TaskCancelled;

/// Cancellation scope for one view (one request, one screen).
pub struct ViewScope {
    cancel: watch::Sender<bool>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(false);
        Self { cancel }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.cancel.subscribe(),
        }
    }

    /// Cancel all tasks spawned from this scope.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Run `work` on the runtime until it completes or the scope is cancelled.
    pub fn spawn<F, T>(&self, work: F) -> ViewTask<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let mut token = self.token();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("View task cancelled before completion");
                }
                output = work => {
                    // The receiver may be gone already; nothing to deliver to then.
                    let _ = tx.send(output);
                }
            }
        });

        ViewTask { rx }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

/// Observer side of a [`ViewScope`].
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        // An error means the sender is gone, which also cancels.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Handle to a task's single result.
pub struct ViewTask<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for ViewTask<T> {
    type Output = Result<T, TaskCancelled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.map_err(|_| TaskCancelled))
    }
}
