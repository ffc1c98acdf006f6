//! Completion channel for widget updates.
//!
//! Every mutating data source operation hands an [`UpdateCompletion`] to the
//! widget and returns the matching [`PendingUpdate`] to the caller. The widget
//! resolves the completion when its batched transaction finishes animating;
//! immediate updates resolve it before the operation returns.
//!
//! # How It Works
//!
//! 1. [`completion_pair`] creates a sender/receiver pair over shared state.
//! 2. The widget calls [`UpdateCompletion::complete`] once, with `true` if the
//!    transaction ran to the end. Dropping an unresolved completion resolves
//!    it with `false`.
//! 3. The caller observes the outcome by polling ([`PendingUpdate::result`]),
//!    by attaching a callback ([`PendingUpdate::on_complete`]), by awaiting the
//!    handle as a future, or by blocking ([`PendingUpdate::wait`]).
//!
//! # Example
//!
//! ```
//! use horizon_collection_core::completion::completion_pair;
//!
//! let (completion, pending) = completion_pair();
//! assert!(!pending.is_complete());
//!
//! completion.complete(true);
//! assert_eq!(pending.result(), Some(true));
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

type CompletionCallback = Box<dyn FnOnce(bool) + Send>;

#[derive(Default)]
struct Outcome {
    finished: Option<bool>,
    waker: Option<Waker>,
    callbacks: Vec<CompletionCallback>,
}

struct CompletionState {
    outcome: Mutex<Outcome>,
    condvar: Condvar,
}

impl CompletionState {
    fn resolve(&self, finished: bool) {
        let (waker, callbacks) = {
            let mut outcome = self.outcome.lock();
            if outcome.finished.is_some() {
                return;
            }
            outcome.finished = Some(finished);
            (outcome.waker.take(), std::mem::take(&mut outcome.callbacks))
        };
        self.condvar.notify_all();

        // Run outside the lock so callbacks may inspect the handle.
        if let Some(waker) = waker {
            waker.wake();
        }
        for callback in callbacks {
            callback(finished);
        }
    }
}

/// The widget side of an update: resolves the caller's [`PendingUpdate`].
pub struct UpdateCompletion {
    inner: Arc<CompletionState>,
    resolved: bool,
}

impl UpdateCompletion {
    /// Resolve the update.
    ///
    /// `finished` reports whether the widget ran the transaction (including
    /// its animation) to the end.
    pub fn complete(mut self, finished: bool) {
        self.resolved = true;
        self.inner.resolve(finished);
    }
}

impl Drop for UpdateCompletion {
    fn drop(&mut self) {
        if !self.resolved {
            self.inner.resolve(false);
        }
    }
}

impl fmt::Debug for UpdateCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCompletion")
            .field("resolved", &self.resolved)
            .finish()
    }
}

/// The caller side of an update.
///
/// Resolves to `true` when the widget finished the update, `false` when the
/// update was abandoned.
pub struct PendingUpdate {
    inner: Arc<CompletionState>,
}

impl PendingUpdate {
    /// Create a handle that is already resolved.
    pub fn resolved(finished: bool) -> Self {
        let (completion, pending) = completion_pair();
        completion.complete(finished);
        pending
    }

    /// Returns `true` once the widget has resolved the update.
    pub fn is_complete(&self) -> bool {
        self.inner.outcome.lock().finished.is_some()
    }

    /// Returns the outcome, or `None` while the update is still running.
    pub fn result(&self) -> Option<bool> {
        self.inner.outcome.lock().finished
    }

    /// Run `callback` with the outcome once the update resolves.
    ///
    /// If the update already resolved, `callback` runs immediately on the
    /// calling thread.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let finished = {
            let mut outcome = self.inner.outcome.lock();
            match outcome.finished {
                Some(finished) => finished,
                None => {
                    outcome.callbacks.push(Box::new(callback));
                    return;
                }
            }
        };
        callback(finished);
    }

    /// Block until the update resolves and return its outcome.
    ///
    /// # Warning
    ///
    /// Widgets resolve batched updates from their own event loop. Calling this
    /// on that same thread before the animation ends will deadlock.
    pub fn wait(self) -> bool {
        let mut outcome = self.inner.outcome.lock();
        loop {
            if let Some(finished) = outcome.finished {
                return finished;
            }
            self.inner.condvar.wait(&mut outcome);
        }
    }

    /// Block until the update resolves or `timeout` elapses.
    ///
    /// Returns `None` if the timeout elapsed first.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<bool> {
        let mut outcome = self.inner.outcome.lock();
        if outcome.finished.is_none() {
            let _ = self.inner.condvar.wait_for(&mut outcome, timeout);
        }
        outcome.finished
    }
}

impl Future for PendingUpdate {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let mut outcome = self.inner.outcome.lock();
        match outcome.finished {
            Some(finished) => Poll::Ready(finished),
            None => {
                outcome.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl fmt::Debug for PendingUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingUpdate")
            .field("result", &self.result())
            .finish()
    }
}

/// Create a connected completion/pending pair.
pub fn completion_pair() -> (UpdateCompletion, PendingUpdate) {
    let state = Arc::new(CompletionState {
        outcome: Mutex::new(Outcome::default()),
        condvar: Condvar::new(),
    });

    (
        UpdateCompletion {
            inner: state.clone(),
            resolved: false,
        },
        PendingUpdate { inner: state },
    )
}

static_assertions::assert_impl_all!(UpdateCompletion: Send, Sync);
static_assertions::assert_impl_all!(PendingUpdate: Send, Sync);
