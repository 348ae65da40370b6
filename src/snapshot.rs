//! # Published readiness snapshot.
//!
//! [`StateDetail`] is an immutable `(state, shortDesc)` pair. The engine builds a new
//! one on every qualifying recomputation and swaps it into a `tokio::sync::watch`
//! channel; readers clone the current `Arc` and never block the engine.
//!
//! ## Wire payload
//! ```text
//! { "state": "ACTIVE_READY", "shortDesc": "Application ready" }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

/// Externally reported application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Starting,
    ActiveReady,
    ActiveNotReady,
    Stopping,
}

impl AppState {
    /// Returns the wire name (e.g. `ACTIVE_READY`).
    pub fn as_str(self) -> &'static str {
        match self {
            AppState::Starting => "STARTING",
            AppState::ActiveReady => "ACTIVE_READY",
            AppState::ActiveNotReady => "ACTIVE_NOT_READY",
            AppState::Stopping => "STOPPING",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable readiness snapshot. Equality is value equality on both fields.
///
/// # Example
/// ```
/// use healthvisor::{AppState, StateDetail};
///
/// let detail = StateDetail::new(AppState::ActiveReady, "Application ready");
/// let json = serde_json::to_value(&detail).unwrap();
/// assert_eq!(json["state"], "ACTIVE_READY");
/// assert_eq!(json["shortDesc"], "Application ready");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDetail {
    pub state: AppState,
    #[serde(rename = "shortDesc")]
    pub short_desc: String,
}

impl StateDetail {
    pub fn new(state: AppState, short_desc: impl Into<String>) -> Self {
        Self {
            state,
            short_desc: short_desc.into(),
        }
    }

    #[inline]
    pub fn is(&self, state: AppState) -> bool {
        self.state == state
    }

    /// Query payload for the health endpoint.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.as_str(),
            "shortDesc": self.short_desc,
        })
    }
}

impl fmt::Display for StateDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.state, self.short_desc)
    }
}

/// Read handle on the published snapshot.
///
/// Cheap to clone; any number of readers may hold one.
#[derive(Clone, Debug)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<StateDetail>>,
}

impl SnapshotReader {
    pub(crate) fn new(rx: watch::Receiver<Arc<StateDetail>>) -> Self {
        Self { rx }
    }

    /// Returns the currently published snapshot.
    pub fn get(&self) -> Arc<StateDetail> {
        Arc::clone(&self.rx.borrow())
    }

    /// Waits until a new snapshot is published and returns it.
    ///
    /// Returns `None` once the engine has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<StateDetail>> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }
}
