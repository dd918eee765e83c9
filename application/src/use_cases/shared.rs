//! Shared session store used by the use cases.
//!
//! The store is written only at turn boundaries and its lock is never held
//! across an `.await`, so readers (the presentation layer) can always take a
//! snapshot while a model call is outstanding.

use duet_domain::{AgentRole, Message, Notepad, SessionState};
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to one session's state
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionState>>,
}

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Run a read-only closure against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a mutating closure against the current state.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Immutable copy of the whole state
    pub fn snapshot(&self) -> SessionState {
        self.read(Clone::clone)
    }

    /// Current notepad content, read fresh
    pub fn notepad_content(&self) -> String {
        self.read(|s| s.notepad().content().to_string())
    }

    pub fn notepad(&self) -> Notepad {
        self.read(|s| s.notepad().clone())
    }

    pub fn push(&self, message: Message) {
        self.update(|s| s.push_message(message));
    }

    pub fn apply_notepad_update(&self, update: Option<&str>, by: AgentRole) -> bool {
        self.update(|s| s.apply_notepad_update(update, by))
    }

    /// Set the busy flag if it was clear. Returns `false` when already busy.
    pub(crate) fn try_begin(&self) -> bool {
        self.update(|s| {
            if s.is_busy() {
                false
            } else {
                s.set_busy(true);
                true
            }
        })
    }
}

/// Clears the busy flag when dropped, on every exit path.
pub(crate) struct BusyGuard<'a> {
    session: &'a SharedSession,
}

impl<'a> BusyGuard<'a> {
    /// Mark the session busy, or return `None` if it already was.
    pub(crate) fn acquire(session: &'a SharedSession) -> Option<Self> {
        session.try_begin().then(|| Self { session })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.update(|s| s.set_busy(false));
    }
}
