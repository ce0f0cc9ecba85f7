//! Cancelable one-shot timer.
//!
//! At most one deferred action is pending per timer. Starting a new one, or
//! calling [`OneShotTimer::reset`], cancels the previous action: a callback
//! that has not fired never fires, and an outstanding [`TimerWait`] resolves
//! to `Err(TimerReset)`.
//!
//! Must be used from within a tokio runtime.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::errors::TimerReset;

#[derive(Debug, Default)]
pub struct OneShotTimer {
    task: Option<JoinHandle<()>>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self { task: None }
    }

    /// Run `callback` once after `delay`, canceling anything pending.
    pub fn start<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.reset();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Like [`start`](Self::start), but hands back a future that resolves
    /// when the timer fires or fails when it is reset.
    pub fn start_awaitable(&mut self, delay: Duration) -> TimerWait {
        self.reset();
        let (tx, rx) = oneshot::channel();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        }));
        TimerWait { rx }
    }

    /// Cancel the pending action, if any.
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.reset();
    }
}

/// Completion of [`OneShotTimer::start_awaitable`].
#[derive(Debug)]
pub struct TimerWait {
    rx: oneshot::Receiver<()>,
}

impl Future for TimerWait {
    type Output = Result<(), TimerReset>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // The sender is dropped without sending when the task is aborted.
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| TimerReset))
    }
}
