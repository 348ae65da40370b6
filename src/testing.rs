//! In-memory host, cluster and observer doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::cluster::ClusterMembership;
use crate::error::{ClusterError, EnumerationError};
use crate::events::{ClusterEventKind, ModuleEvent, ModuleEventKind, RootEventKind, ServiceEventKind, Transition};
use crate::facts::{ModuleFact, ServiceFact};
use crate::host::{ComponentHost, Listener, Stream};
use crate::observers::Observe;

fn same(a: &Arc<dyn Listener>, b: &Arc<dyn Listener>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Host whose facts are set directly by the test.
#[derive(Default)]
pub struct FakeHost {
    modules: Mutex<Vec<ModuleFact>>,
    services: Mutex<Vec<ServiceFact>>,
    fail_modules: AtomicBool,
    fail_services: AtomicBool,
    started: AtomicBool,
    stall: Mutex<Option<Duration>>,
    listeners: Mutex<HashMap<Stream, Vec<Arc<dyn Listener>>>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modules(&self, modules: Vec<ModuleFact>) {
        *self.modules.lock().unwrap() = modules;
    }

    pub fn set_services(&self, services: Vec<ServiceFact>) {
        *self.services.lock().unwrap() = services;
    }

    pub fn set_started(&self, started: bool) {
        self.started.store(started, Ordering::SeqCst);
    }

    pub fn fail_modules(&self, fail: bool) {
        self.fail_modules.store(fail, Ordering::SeqCst);
    }

    pub fn fail_services(&self, fail: bool) {
        self.fail_services.store(fail, Ordering::SeqCst);
    }

    /// Makes the next module enumeration block for `delay` after reading its facts.
    pub fn stall_next_modules(&self, delay: Duration) {
        *self.stall.lock().unwrap() = Some(delay);
    }

    /// Number of listeners currently registered across all streams.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().values().map(Vec::len).sum()
    }

    fn listeners(&self, stream: Stream) -> Vec<Arc<dyn Listener>> {
        self.listeners
            .lock()
            .unwrap()
            .get(&stream)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fire_module(&self, kind: ModuleEventKind, module: ModuleFact) {
        let event = ModuleEvent::new(kind, module);
        for l in self.listeners(Stream::Module) {
            l.on_module_event(&event);
        }
    }

    pub fn fire_service(&self, kind: ServiceEventKind) {
        for l in self.listeners(Stream::Service) {
            l.on_service_event(kind);
        }
    }

    /// Delivers a root event; `Started` also flips [`ComponentHost::is_started`].
    pub fn fire_root(&self, kind: RootEventKind) {
        if kind == RootEventKind::Started {
            self.set_started(true);
        }
        for l in self.listeners(Stream::Root) {
            l.on_root_event(kind);
        }
    }
}

impl ComponentHost for FakeHost {
    fn modules(&self) -> Result<Vec<ModuleFact>, EnumerationError> {
        if self.fail_modules.load(Ordering::SeqCst) {
            return Err(EnumerationError::modules("host stopping"));
        }
        let facts = self.modules.lock().unwrap().clone();
        let stall = self.stall.lock().unwrap().take();
        if let Some(delay) = stall {
            std::thread::sleep(delay);
        }
        Ok(facts)
    }

    fn services(&self) -> Result<Vec<ServiceFact>, EnumerationError> {
        if self.fail_services.load(Ordering::SeqCst) {
            return Err(EnumerationError::services("host stopping"));
        }
        Ok(self.services.lock().unwrap().clone())
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    fn add_listener(&self, stream: Stream, listener: Arc<dyn Listener>) {
        self.listeners
            .lock()
            .unwrap()
            .entry(stream)
            .or_default()
            .push(listener);
    }

    fn remove_listener(&self, stream: Stream, listener: &Arc<dyn Listener>) {
        if let Some(list) = self.listeners.lock().unwrap().get_mut(&stream) {
            list.retain(|l| !same(l, listener));
        }
    }
}

/// Cluster collaborator recording registrations and start requests.
pub struct FakeCluster {
    enabled: bool,
    started: bool,
    refuse: bool,
    starts: AtomicUsize,
    listeners: Mutex<Vec<(String, Arc<dyn Listener>)>>,
}

impl FakeCluster {
    pub fn new(enabled: bool, started: bool) -> Self {
        Self {
            enabled,
            started,
            refuse: false,
            starts: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Makes every registration fail.
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    pub fn registered(&self) -> Vec<String> {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn start_requests(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Delivers `kind` to every registered listener.
    pub fn fire(&self, kind: ClusterEventKind) {
        let listeners: Vec<_> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for l in listeners {
            l.on_cluster_event(kind);
        }
    }
}

impl ClusterMembership for FakeCluster {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn start_cluster_management(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn register(&self, listener_id: &str, listener: Arc<dyn Listener>) -> Result<(), ClusterError> {
        if self.refuse {
            return Err(ClusterError::RegistrationRefused {
                listener: listener_id.to_string(),
                reason: "cluster service unavailable".to_string(),
            });
        }
        self.listeners
            .lock()
            .unwrap()
            .push((listener_id.to_string(), listener));
        Ok(())
    }

    fn unregister(&self, listener_id: &str) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|(id, _)| id != listener_id);
    }
}

/// Listener that ignores everything.
pub struct NoopListener;

impl Listener for NoopListener {}

/// Observer counting transitions and "system ready" signals.
#[derive(Default)]
pub struct CountingObserver {
    transitions: AtomicUsize,
    ready: AtomicUsize,
}

impl CountingObserver {
    pub fn transitions(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    pub fn ready_signals(&self) -> usize {
        self.ready.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Observe for CountingObserver {
    async fn on_transition(&self, t: &Transition) {
        self.transitions.fetch_add(1, Ordering::SeqCst);
        if t.became_ready() {
            self.ready.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}
