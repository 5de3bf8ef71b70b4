//! Per-form "is submitting" flag

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{Result, SemproError};

/// Prevents a form from being submitted twice while a request is in flight
#[derive(Debug, Default)]
pub struct SubmitGuard {
    submitting: AtomicBool,
}

/// Held for the duration of one submission; clears the flag when dropped
#[derive(Debug)]
pub struct SubmitTicket<'a> {
    guard: &'a SubmitGuard,
}

impl SubmitGuard {
    pub fn new() -> Self {
        SubmitGuard::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Mark the form as submitting, or fail if it already is
    pub fn try_begin(&self) -> Result<SubmitTicket<'_>> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(SemproError::AlreadySubmitting);
        }
        Ok(SubmitTicket { guard: self })
    }
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.guard.submitting.store(false, Ordering::SeqCst);
    }
}
