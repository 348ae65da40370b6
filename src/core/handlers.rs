//! # Event handlers registered with the host and the cluster collaborator.
//!
//! Each handler is a named type holding an explicit reference to the [`Engine`]
//! it drives, and implements only its own [`Listener`] method.
//!
//! ## Dispatch rules
//! ```text
//! module event  ──► root started? ──► kind filter (resolved: fragments only) ──► recompute
//! service event ──► root started? ──► registered|modified|unregistering       ──► recompute
//! root event    ──► record kind; STARTED marks root started
//!               ──► root started && not informational                          ──► recompute
//!               ──► STARTED && not ACTIVE_READY                                ──► schedule startup check
//! cluster event ──► RUNNING/FAILED update the liaison                          ──► recompute
//! ```
//!
//! Events received before the root process started are dropped; the first
//! recomputation after start reads the full current state anyway.

use std::sync::Arc;

use crate::core::engine::Engine;
use crate::events::{ClusterEventKind, ModuleEvent, RootEventKind, ServiceEventKind};
use crate::host::Listener;
use crate::snapshot::AppState;

pub(crate) struct ModuleEventHandler {
    engine: Arc<Engine>,
}

impl ModuleEventHandler {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl Listener for ModuleEventHandler {
    fn on_module_event(&self, event: &ModuleEvent) {
        tracing::debug!(kind = ?event.kind, module = %event.module.symbolic_name, "module event");
        if self.engine.root_started() && event.triggers_recompute() {
            self.engine.recompute();
        }
    }
}

pub(crate) struct ServiceEventHandler {
    engine: Arc<Engine>,
}

impl ServiceEventHandler {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl Listener for ServiceEventHandler {
    fn on_service_event(&self, kind: ServiceEventKind) {
        tracing::debug!(?kind, "service event");
        if self.engine.root_started() && kind.triggers_recompute() {
            self.engine.recompute();
        }
    }
}

pub(crate) struct RootEventHandler {
    engine: Arc<Engine>,
}

impl RootEventHandler {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl Listener for RootEventHandler {
    fn on_root_event(&self, kind: RootEventKind) {
        tracing::debug!(?kind, "root event");
        self.engine.record_root_event(kind);

        if self.engine.root_started() && kind.triggers_recompute() {
            self.engine.recompute();
        }
        if kind == RootEventKind::Started
            && !self.engine.machine.current().is(AppState::ActiveReady)
        {
            let grace = self.engine.requirements.startup_grace;
            self.engine
                .startup
                .schedule(Arc::downgrade(&self.engine), grace);
        }
    }
}

pub(crate) struct ClusterEventHandler {
    engine: Arc<Engine>,
}

impl ClusterEventHandler {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl Listener for ClusterEventHandler {
    fn on_cluster_event(&self, kind: ClusterEventKind) -> bool {
        tracing::debug!(?kind, "cluster event");
        if self.engine.cluster.handle(kind) {
            self.engine.recompute();
        }
        true
    }
}
