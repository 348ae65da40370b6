//! # Published state transitions.
//!
//! A [`Transition`] is emitted to observers every time the engine publishes a new
//! snapshot. It carries both the previous and the new [`StateDetail`].
//!
//! ## Ordering guarantees
//! Each transition has a per-engine sequence number (`seq`) that increases
//! monotonically in publication order.

use std::sync::Arc;
use std::time::SystemTime;

use crate::snapshot::{AppState, StateDetail};

/// A change of the published snapshot.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Monotonic per-engine sequence number.
    pub seq: u64,
    /// Wall-clock timestamp of the publication.
    pub at: SystemTime,
    /// Snapshot before the change.
    pub from: Arc<StateDetail>,
    /// Snapshot after the change.
    pub to: Arc<StateDetail>,
}

impl Transition {
    pub fn new(seq: u64, from: Arc<StateDetail>, to: Arc<StateDetail>) -> Self {
        Self {
            seq,
            at: SystemTime::now(),
            from,
            to,
        }
    }

    /// The "system ready" signal: entering `ACTIVE_READY` from any other state.
    #[inline]
    pub fn became_ready(&self) -> bool {
        !self.from.is(AppState::ActiveReady) && self.to.is(AppState::ActiveReady)
    }

    /// Leaving `ACTIVE_READY` for any other state.
    #[inline]
    pub fn left_ready(&self) -> bool {
        self.from.is(AppState::ActiveReady) && !self.to.is(AppState::ActiveReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(state: AppState) -> Arc<StateDetail> {
        Arc::new(StateDetail::new(state, state.as_str()))
    }

    #[test]
    fn test_ready_edges() {
        let up = Transition::new(1, detail(AppState::Starting), detail(AppState::ActiveReady));
        assert!(up.became_ready());
        assert!(!up.left_ready());

        let down = Transition::new(2, detail(AppState::ActiveReady), detail(AppState::Stopping));
        assert!(down.left_ready());
        assert!(!down.became_ready());

        let sideways = Transition::new(
            3,
            detail(AppState::ActiveNotReady),
            Arc::new(StateDetail::new(AppState::ActiveNotReady, "other")),
        );
        assert!(!sideways.became_ready());
        assert!(!sideways.left_ready());
    }
}
