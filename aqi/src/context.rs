//! Context provides a cancellation, similar to Golang's Context.
//!
//! A Context may also carry a deadline, after which it reads as cancelled.

use std::{
    ops::Deref,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

#[derive(Clone, Debug)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// Create a new Context.
    pub fn new() -> Self {
        Context {
            inner: Arc::new(ContextInner::new(None)),
        }
    }

    /// Create a Context that expires after the given duration.
    pub fn with_timeout(timeout: Duration) -> Self {
        Context {
            inner: Arc::new(ContextInner::new(Instant::now().checked_add(timeout))),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Context {
    type Target = ContextInner;

    fn deref(&self) -> &Self::Target {
        self.inner.deref()
    }
}

#[derive(Debug)]
pub struct ContextInner {
    cancelled: Mutex<bool>,
    deadline: Option<Instant>,
}

impl ContextInner {
    fn new(deadline: Option<Instant>) -> Self {
        ContextInner {
            cancelled: Mutex::new(false),
            deadline,
        }
    }

    // A poisoned lock still holds a meaningful flag.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.cancelled.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cancel the context.
    pub fn cancel(&self) {
        *self.lock() = true;
    }

    /// Returns true iff the context has been cancelled explicitly.
    pub fn is_cancelled(&self) -> bool {
        *self.lock()
    }

    /// Returns true iff the context's deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns true iff the context is cancelled or expired.
    pub fn is_done(&self) -> bool {
        self.is_expired() || self.is_cancelled()
    }

    /// Time left until the deadline, if there is one.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}
