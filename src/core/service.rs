//! # HealthService: lifecycle hooks and query surface of the readiness engine.
//!
//! The [`HealthService`] owns the engine, the handlers registered with the host and
//! the cluster collaborator, and exposes the published snapshot.
//!
//! ## Lifecycle
//! ```text
//! builder(cfg).activate(host, props)
//!   ├─ compile requirements            (ConfigError → activation fails)
//!   ├─ register module/service/root handlers with the host
//!   └─ host already started? ─► mark root started, schedule startup check (short delay)
//!
//! cluster_attached / cluster_modified / cluster_detached   (host service tracker)
//!
//! deactivate()
//!   ├─ request stop                     (in-flight recomputations stop publishing)
//!   ├─ cancel the startup check
//!   ├─ remove handlers, detach cluster
//!   └─ force-publish STOPPING
//!
//! shutdown().await = deactivate() + drain observers
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let svc = HealthService::builder(Config::default())
//!     .with_observers(vec![Arc::new(LogWriter::new())])
//!     .activate(host, [("requiredModules", "core, repo-(a|b)")])?;
//!
//! let payload = svc.payload(); // {"state": "STARTING", "shortDesc": "Application starting"}
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    cluster::{ClusterFact, ClusterMembership},
    config::Config,
    core::{
        builder::HealthServiceBuilder,
        engine::Engine,
        handlers::{ClusterEventHandler, ModuleEventHandler, RootEventHandler, ServiceEventHandler},
    },
    events::RootEventKind,
    host::{Listener, Stream},
    requirements::RequirementSet,
    snapshot::{AppState, SnapshotReader, StateDetail},
};

/// Readiness engine bound to one host for one activation cycle.
pub struct HealthService {
    cfg: Config,
    engine: Arc<Engine>,
    handlers: Vec<(Stream, Arc<dyn Listener>)>,
    cluster_handler: Arc<dyn Listener>,
    deactivated: AtomicBool,
}

impl HealthService {
    /// Returns a builder for activating a service.
    pub fn builder(cfg: Config) -> HealthServiceBuilder {
        HealthServiceBuilder::new(cfg)
    }

    pub(crate) fn wire(cfg: Config, engine: Arc<Engine>) -> Self {
        let module: Arc<dyn Listener> = Arc::new(ModuleEventHandler::new(Arc::clone(&engine)));
        let service: Arc<dyn Listener> = Arc::new(ServiceEventHandler::new(Arc::clone(&engine)));
        let root: Arc<dyn Listener> = Arc::new(RootEventHandler::new(Arc::clone(&engine)));
        let handlers = vec![
            (Stream::Module, module),
            (Stream::Service, service),
            (Stream::Root, root),
        ];
        let cluster_handler: Arc<dyn Listener> =
            Arc::new(ClusterEventHandler::new(Arc::clone(&engine)));

        let already_started = engine.host.is_started();
        if already_started {
            engine.mark_root_started();
        }
        for (stream, handler) in &handlers {
            engine.host.add_listener(*stream, Arc::clone(handler));
        }
        if already_started {
            engine
                .startup
                .schedule(Arc::downgrade(&engine), cfg.already_started_delay);
        }

        Self {
            cfg,
            engine,
            handlers,
            cluster_handler,
            deactivated: AtomicBool::new(false),
        }
    }

    /// Currently published snapshot. Never blocks on the engine.
    pub fn snapshot(&self) -> Arc<StateDetail> {
        self.engine.machine.current()
    }

    /// Query payload: `{"state": .., "shortDesc": ..}`.
    pub fn payload(&self) -> serde_json::Value {
        self.snapshot().to_json()
    }

    /// Returns a reader that can await snapshot changes.
    pub fn watch(&self) -> SnapshotReader {
        self.engine.machine.reader()
    }

    /// Requirements in effect for this activation.
    pub fn requirements(&self) -> &RequirementSet {
        &self.engine.requirements
    }

    /// Current cluster facts.
    pub fn cluster_fact(&self) -> ClusterFact {
        self.engine.cluster.fact()
    }

    /// Latest root-process event kind seen since activation.
    pub fn last_root_event(&self) -> Option<RootEventKind> {
        self.engine.last_root_event()
    }

    /// Recomputes readiness from the current host state.
    pub fn recompute(&self) {
        self.engine.recompute();
    }

    /// The cluster collaborator appeared.
    pub fn cluster_attached(&self, svc: Arc<dyn ClusterMembership>) {
        if self.is_deactivated() {
            return;
        }
        if self
            .engine
            .cluster
            .attach(svc, Arc::clone(&self.cluster_handler))
            && self.engine.root_started()
        {
            self.engine.recompute();
        }
    }

    /// The cluster collaborator was replaced by a new instance.
    pub fn cluster_modified(&self, svc: Arc<dyn ClusterMembership>) {
        if self.is_deactivated() {
            return;
        }
        self.engine
            .cluster
            .replace(svc, Arc::clone(&self.cluster_handler));
    }

    /// The cluster collaborator went away.
    pub fn cluster_detached(&self) {
        if self.is_deactivated() {
            return;
        }
        self.engine.cluster.detach();
        if self.engine.root_started() {
            self.engine.recompute();
        }
    }

    /// Stops the engine and force-publishes `STOPPING`. Idempotent.
    pub fn deactivate(&self) {
        if self.deactivated.swap(true, Ordering::SeqCst) {
            return;
        }
        self.engine.machine.request_stop();
        self.engine.startup.cancel();
        for (stream, handler) in &self.handlers {
            self.engine.host.remove_listener(*stream, handler);
        }
        self.engine.cluster.detach();
        self.engine
            .stop(StateDetail::new(AppState::Stopping, self.cfg.stopping_desc()));
        tracing::info!("health service deactivated");
    }

    /// Deactivates and waits for observers to process every transition.
    pub async fn shutdown(&self) {
        self.deactivate();
        self.engine.machine.observers().close().await;
    }

    /// True once [`deactivate`](Self::deactivate) ran.
    pub fn is_deactivated(&self) -> bool {
        self.deactivated.load(Ordering::SeqCst)
    }
}
