//! Re-entrancy lock
//!
//! Held for the whole of every mutating entry point. Collaborator callbacks
//! that try to enter the engine again while it is held are turned away.

use std::cell::Cell;

use dsc_common::errors::{DscError, DscResult};

/// Scoped re-entrancy lock
#[derive(Debug, Default)]
pub struct ReentrancyLock {
    held: Cell<bool>,
}

impl ReentrancyLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock, failing with `Reentrancy` if it is already held.
    ///
    /// The lock is released when the returned guard is dropped, whichever way
    /// the caller exits.
    pub fn acquire(&self) -> DscResult<LockGuard<'_>> {
        if self.held.replace(true) {
            return Err(DscError::Reentrancy);
        }
        Ok(LockGuard { lock: self })
    }

    /// Returns true while an operation is in progress
    pub fn is_held(&self) -> bool {
        self.held.get()
    }
}

/// Releases its [`ReentrancyLock`] on drop
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    lock: &'a ReentrancyLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.held.set(false);
    }
}
