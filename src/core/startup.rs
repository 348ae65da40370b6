//! # One-shot delayed startup check.
//!
//! The only background work the engine does. After the root process started (or
//! right after activation in an already-started host) the engine waits for the
//! grace period, clears the startup-suppression flag and recomputes, so a lingering
//! failure becomes visible as `ACTIVE_NOT_READY` instead of a permanent `STARTING`.
//!
//! ## Rules
//! - At most one check is pending; scheduling again cancels the previous one.
//! - `cancel()` is permanent: pending and future checks are dropped.
//! - The timer holds only a weak reference to the engine.

use std::sync::{Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::core::engine::Engine;

pub(crate) struct StartupCheck {
    rt: Handle,
    runtime_token: CancellationToken,
    pending: Mutex<Option<CancellationToken>>,
}

impl StartupCheck {
    pub fn new(rt: Handle) -> Self {
        Self {
            rt,
            runtime_token: CancellationToken::new(),
            pending: Mutex::new(None),
        }
    }

    /// Arms the check to fire after `delay`.
    pub fn schedule(&self, engine: Weak<Engine>, delay: Duration) {
        if self.runtime_token.is_cancelled() {
            return;
        }
        let token = self.runtime_token.child_token();
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        tracing::debug!(delay_ms = delay.as_millis() as u64, "startup check scheduled");
        self.rt.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(engine) = engine.upgrade() {
                        engine.finish_startup();
                    }
                }
            }
        });
    }

    /// Drops the pending check and refuses future ones.
    pub fn cancel(&self) {
        self.runtime_token.cancel();
    }
}
