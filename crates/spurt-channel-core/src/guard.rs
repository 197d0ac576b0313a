//! Non-blocking re-entrancy guard.
//!
//! `ProcessingGuard` drops contending callers instead of making them wait.
//! Entering hands back a `GuardToken`; dropping the token is the only way
//! back to `Idle`, so every exit path (early return, `?`, panic unwind)
//! lowers the guard.

use std::cell::Cell;

/// Whether a guarded mutation is currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Idle,
    Processing,
}

/// Single-threaded drop-on-contention guard.
#[derive(Debug, Default)]
pub struct ProcessingGuard {
    state: Cell<GuardState>,
}

impl ProcessingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state.get()
    }

    pub fn is_processing(&self) -> bool {
        self.state.get() == GuardState::Processing
    }

    /// Raise the guard if it is idle.
    ///
    /// Returns `None` while another holder is active. The state is left
    /// untouched in that case.
    pub fn try_enter(&self) -> Option<GuardToken<'_>> {
        if self.is_processing() {
            return None;
        }
        self.state.set(GuardState::Processing);
        Some(GuardToken { guard: self })
    }
}

/// Proof that the guard is raised. Lowers it on drop.
#[derive(Debug)]
#[must_use = "the guard is lowered as soon as the token is dropped"]
pub struct GuardToken<'a> {
    guard: &'a ProcessingGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.state.set(GuardState::Idle);
    }
}
