//! # Example: simulated_boot
//!
//! Drives a [`HealthService`] through a simulated host boot with the built-in
//! [`LogWriter`] observer and `tracing` output.
//!
//! ## Flow
//! ```text
//! activate ──► STARTING
//! root STARTED (repo module still resolving) ──► suppressed, startup check armed
//! repo module starts                          ──► ACTIVE_READY  ("Demo ready")
//! router service unregisters                  ──► ACTIVE_NOT_READY
//! router service registers again              ──► ACTIVE_READY
//! shutdown                                    ──► STOPPING
//! ```
//!
//! Run with:
//! ```bash
//! RUST_LOG=healthvisor=debug cargo run --example simulated_boot --features logging
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use healthvisor::{
    ActivationState, ClusterError, ClusterMembership, ComponentHost, Config,
    EnumerationError, HealthService, Listener, LogWriter, ModuleEvent, ModuleEventKind,
    ModuleFact, Observe, RootEventKind, ServiceEventKind, ServiceFact, Stream,
};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct SimHost {
    modules: Mutex<Vec<ModuleFact>>,
    services: Mutex<Vec<ServiceFact>>,
    listeners: Mutex<HashMap<Stream, Vec<Arc<dyn Listener>>>>,
}

impl SimHost {
    fn listeners(&self, stream: Stream) -> Vec<Arc<dyn Listener>> {
        self.listeners.lock().unwrap().get(&stream).cloned().unwrap_or_default()
    }

    fn start_module(&self, name: &str) {
        let fact = ModuleFact::normal(name, ActivationState::Active);
        self.modules.lock().unwrap().push(fact.clone());
        let event = ModuleEvent::new(ModuleEventKind::Started, fact);
        for l in self.listeners(Stream::Module) {
            l.on_module_event(&event);
        }
    }

    fn set_service(&self, id: &str, present: bool) {
        let kind = {
            let mut services = self.services.lock().unwrap();
            services.retain(|s| !s.aliases.iter().any(|a| a == id));
            if present {
                services.push(ServiceFact::new(id));
                ServiceEventKind::Registered
            } else {
                ServiceEventKind::Unregistering
            }
        };
        for l in self.listeners(Stream::Service) {
            l.on_service_event(kind);
        }
    }

    fn root(&self, kind: RootEventKind) {
        for l in self.listeners(Stream::Root) {
            l.on_root_event(kind);
        }
    }
}

impl ComponentHost for SimHost {
    fn modules(&self) -> Result<Vec<ModuleFact>, EnumerationError> {
        Ok(self.modules.lock().unwrap().clone())
    }

    fn services(&self) -> Result<Vec<ServiceFact>, EnumerationError> {
        Ok(self.services.lock().unwrap().clone())
    }

    fn is_started(&self) -> bool {
        false
    }

    fn add_listener(&self, stream: Stream, listener: Arc<dyn Listener>) {
        self.listeners.lock().unwrap().entry(stream).or_default().push(listener);
    }

    fn remove_listener(&self, stream: Stream, listener: &Arc<dyn Listener>) {
        if let Some(list) = self.listeners.lock().unwrap().get_mut(&stream) {
            list.retain(|l| !Arc::ptr_eq(l, listener));
        }
    }
}

/// Single-node deployment: clustering switched off.
struct StandaloneCluster;

impl ClusterMembership for StandaloneCluster {
    fn is_enabled(&self) -> bool {
        false
    }

    fn is_started(&self) -> bool {
        false
    }

    fn start_cluster_management(&self) {}

    fn register(&self, _id: &str, _listener: Arc<dyn Listener>) -> Result<(), ClusterError> {
        Ok(())
    }

    fn unregister(&self, _id: &str) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let host = Arc::new(SimHost::default());
    host.start_module("demo.core");

    let cfg = Config {
        display_name: "Demo".into(),
        ..Config::default()
    };
    let svc = HealthService::builder(cfg)
        .with_observers(vec![Arc::new(LogWriter::new()) as Arc<dyn Observe>])
        .activate(
            host.clone(),
            [
                ("requiredModules", "demo.core, demo.repo-(jdbc|ldap)"),
                ("requiredServices", r"demo\.router"),
                ("startupGraceMillis", "500"),
            ],
        )?;
    svc.cluster_attached(Arc::new(StandaloneCluster));
    host.set_service("demo.router", true);
    println!("payload: {}", svc.payload());

    host.root(RootEventKind::Started);
    println!("payload: {}", svc.payload());

    tokio::time::sleep(Duration::from_millis(100)).await;
    host.start_module("demo.repo-jdbc");
    println!("payload: {}", svc.payload());

    host.set_service("demo.router", false);
    host.set_service("demo.router", true);

    svc.shutdown().await;
    println!("payload: {}", svc.payload());
    Ok(())
}
