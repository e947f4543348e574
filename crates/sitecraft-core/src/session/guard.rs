//! In-flight guard for session operations.
//!
//! Entering a busy state snapshots the state it replaced. Unless the guard is
//! committed with a final state, dropping it puts the snapshot back, so an
//! operation future that is cancelled or dropped mid-call never leaves the
//! session stuck in `Generating`/`Improving`.

use std::sync::{Mutex, PoisonError};

use sitecraft_types::error::SessionError;
use sitecraft_types::session::SessionState;

pub(crate) struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    previous: SessionState,
    armed: bool,
}

impl<'a> InFlight<'a> {
    /// Atomically check the current state and move to the busy state `next` returns.
    ///
    /// The state is left untouched when `next` returns an error.
    pub(crate) fn enter(
        state: &'a Mutex<SessionState>,
        next: impl FnOnce(&SessionState) -> Result<SessionState, SessionError>,
    ) -> Result<Self, SessionError> {
        let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
        let busy = next(&current)?;
        let previous = std::mem::replace(&mut *current, busy);
        Ok(Self {
            state,
            previous,
            armed: true,
        })
    }

    /// The state that was replaced on entry.
    pub(crate) fn previous(&self) -> &SessionState {
        &self.previous
    }

    /// Leave the busy state for `finished` instead of restoring the snapshot.
    pub(crate) fn commit(mut self, finished: SessionState) {
        self.armed = false;
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = finished;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let previous = std::mem::replace(&mut self.previous, SessionState::Idle);
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_types::artifact::WebsiteArtifact;

    fn ready() -> SessionState {
        SessionState::Ready(WebsiteArtifact {
            markup: "<p>kept</p>".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_drop_restores_previous_state() {
        let state = Mutex::new(ready());
        {
            let guard = InFlight::enter(&state, |_| Ok(SessionState::Generating)).unwrap();
            assert_eq!(guard.previous(), &ready());
            assert_eq!(*state.lock().unwrap(), SessionState::Generating);
        }
        assert_eq!(*state.lock().unwrap(), ready());
    }

    #[test]
    fn test_commit_keeps_final_state() {
        let state = Mutex::new(SessionState::Idle);
        let guard = InFlight::enter(&state, |_| Ok(SessionState::Generating)).unwrap();
        guard.commit(ready());
        assert_eq!(*state.lock().unwrap(), ready());
    }

    #[test]
    fn test_rejected_entry_leaves_state_untouched() {
        let state = Mutex::new(SessionState::Generating);
        let result = InFlight::enter(&state, |current| {
            if current.is_busy() {
                Err(SessionError::Busy)
            } else {
                Ok(SessionState::Generating)
            }
        });
        assert!(matches!(result, Err(SessionError::Busy)));
        assert_eq!(*state.lock().unwrap(), SessionState::Generating);
    }
}
