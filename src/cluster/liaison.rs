//! # Cluster liaison: tracks the cluster collaborator and its RUNNING/FAILED signal.
//!
//! ## Architecture
//! ```text
//! host tracker ──► attach(svc)  ──► svc.register(LISTENER_ID, handler)
//!                                   enabled = svc.is_enabled()
//!                                   enabled && !started ─► svc.start_cluster_management()
//!              ──► replace(svc) ──► old.unregister(), svc.register()   (up unchanged)
//!              ──► detach()     ──► old.unregister(), up = false
//!
//! svc ──► handler.on_cluster_event(kind) ──► handle(kind)
//!                                              ├─ InstanceRunning → up = true
//!                                              ├─ InstanceFailed  → up = false
//!                                              └─ Other           → ignored
//! ```
//!
//! ## Rules
//! - `up` only changes on RUNNING/FAILED events, or is forced false on detach.
//! - `enabled` defaults to true until a collaborator says otherwise, so a missing
//!   cluster subsystem keeps the instance not ready.
//! - Registration failures are logged and not retried; the liaison stays detached.
//! - No liaison lock is held while calling the collaborator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::cluster::ClusterMembership;
use crate::events::ClusterEventKind;
use crate::host::Listener;

/// Listener id under which the engine registers with the cluster collaborator.
pub const LISTENER_ID: &str = "healthService";

/// Cluster facts consumed by the readiness decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterFact {
    pub enabled: bool,
    pub attached: bool,
    pub up: bool,
}

impl ClusterFact {
    /// True if clustering blocks readiness.
    #[inline]
    pub fn blocks_readiness(&self) -> bool {
        self.enabled && !self.up
    }
}

/// Tracks attachment and liveness of the cluster collaborator.
pub struct ClusterLiaison {
    attached: Mutex<Option<Arc<dyn ClusterMembership>>>,
    enabled: AtomicBool,
    up: AtomicBool,
}

impl Default for ClusterLiaison {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterLiaison {
    pub fn new() -> Self {
        Self {
            attached: Mutex::new(None),
            enabled: AtomicBool::new(true),
            up: AtomicBool::new(false),
        }
    }

    /// Attaches a cluster collaborator and registers `listener` with it.
    ///
    /// Returns false if registration was refused.
    pub fn attach(&self, svc: Arc<dyn ClusterMembership>, listener: Arc<dyn Listener>) -> bool {
        if let Err(e) = svc.register(LISTENER_ID, listener) {
            tracing::warn!(error = %e, label = e.as_label(), "cluster listener registration failed; cluster stays down");
            return false;
        }
        let enabled = svc.is_enabled();
        self.enabled.store(enabled, Ordering::SeqCst);
        if enabled && !svc.is_started() {
            tracing::debug!("requesting cluster management start");
            svc.start_cluster_management();
        }
        *self.lock() = Some(svc);
        tracing::debug!(enabled, "cluster collaborator attached");
        true
    }

    /// Swaps in a replacement collaborator. Does not touch `up`.
    pub fn replace(&self, svc: Arc<dyn ClusterMembership>, listener: Arc<dyn Listener>) -> bool {
        let old = self.lock().take();
        if let Some(old) = old {
            old.unregister(LISTENER_ID);
        }
        if let Err(e) = svc.register(LISTENER_ID, listener) {
            tracing::warn!(error = %e, label = e.as_label(), "cluster listener re-registration failed");
            return false;
        }
        *self.lock() = Some(svc);
        tracing::debug!("cluster collaborator replaced");
        true
    }

    /// Detaches the current collaborator, if any, and forces `up = false`.
    pub fn detach(&self) {
        let old = self.lock().take();
        if let Some(old) = old {
            old.unregister(LISTENER_ID);
            self.up.store(false, Ordering::SeqCst);
            tracing::debug!("cluster collaborator detached");
        }
    }

    /// Applies a cluster event. Returns true for RUNNING/FAILED, which call for a
    /// recomputation.
    pub fn handle(&self, kind: ClusterEventKind) -> bool {
        match kind {
            ClusterEventKind::InstanceRunning => {
                self.up.store(true, Ordering::SeqCst);
                true
            }
            ClusterEventKind::InstanceFailed => {
                self.up.store(false, Ordering::SeqCst);
                true
            }
            ClusterEventKind::Other => false,
        }
    }

    /// Current cluster facts.
    pub fn fact(&self) -> ClusterFact {
        ClusterFact {
            enabled: self.enabled.load(Ordering::SeqCst),
            attached: self.lock().is_some(),
            up: self.up.load(Ordering::SeqCst),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn ClusterMembership>>> {
        self.attached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
