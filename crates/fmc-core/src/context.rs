//! Per-call request context.
//!
//! A [`RequestContext`] travels with every operation and lets the caller bound
//! how long the exchange may take or abort it from another task. Either way
//! the operation ends with [`Error::Request`].

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Caller-controlled deadline and cancellation for a single operation.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    timeout: Option<Duration>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Handle that cancels every [`RequestContext`] created alongside it.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. In-flight operations fail promptly.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true once [`CancelHandle::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

impl RequestContext {
    /// A context with no deadline that is never cancelled.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context paired with a handle that can cancel it.
    #[must_use]
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let context = Self {
            timeout: None,
            cancel: Some(receiver),
        };
        (context, CancelHandle { sender })
    }

    /// Bound the whole exchange by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured deadline, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns true if the context has already been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    async fn cancelled(&self) {
        if let Some(receiver) = &self.cancel {
            let mut receiver = receiver.clone();
            if receiver.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        // No signal, or the handle was dropped without cancelling.
        std::future::pending::<()>().await;
    }

    /// Drive `operation` to completion unless the context is cancelled or its
    /// deadline passes first.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, or [`Error::Request`] naming `url`
    /// when the context ends it early.
    pub async fn run<T, F>(&self, url: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::request(url, "request cancelled"));
        }

        let guarded = async {
            tokio::select! {
                result = operation => result,
                () = self.cancelled() => Err(Error::request(url, "request cancelled")),
            }
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .unwrap_or_else(|_| {
                    Err(Error::request(url, format!("deadline of {limit:?} exceeded")))
                }),
            None => guarded.await,
        }
    }
}
