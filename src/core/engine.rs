//! # Engine: shared state driven by every handler.
//!
//! ```text
//! handler ──► Engine::recompute()
//!               ├─ take fact generation
//!               ├─ host.modules() / host.services()   ─┐  no lock held
//!               ├─ FactCollector::evaluate()            │
//!               ├─ ClusterLiaison::fact()              ─┘
//!               └─ lock machine
//!                    ├─ stale generation? ─► discard
//!                    ├─ decide()
//!                    └─ ReadinessMachine::apply()  ─► watch swap + observers
//! ```
//!
//! Recomputations run on the calling thread. Collaborator calls never happen under
//! the machine lock, so a slow host cannot delay [`Engine::stop`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::cluster::ClusterLiaison;
use crate::core::machine::ReadinessMachine;
use crate::core::startup::StartupCheck;
use crate::events::RootEventKind;
use crate::cluster::ClusterFact;
use crate::facts::{FactCollector, Findings};
use crate::host::ComponentHost;
use crate::requirements::RequirementSet;
use crate::snapshot::{AppState, StateDetail};

pub(crate) struct Engine {
    pub requirements: RequirementSet,
    pub host: Arc<dyn ComponentHost>,
    pub collector: FactCollector,
    pub cluster: ClusterLiaison,
    pub machine: ReadinessMachine,
    pub startup: StartupCheck,
    generation: AtomicU64,
    root_started: AtomicBool,
    last_root_event: Mutex<Option<RootEventKind>>,
}

impl Engine {
    pub fn new(
        requirements: RequirementSet,
        host: Arc<dyn ComponentHost>,
        collector: FactCollector,
        machine: ReadinessMachine,
        startup: StartupCheck,
    ) -> Self {
        Self {
            requirements,
            host,
            collector,
            cluster: ClusterLiaison::new(),
            machine,
            startup,
            generation: AtomicU64::new(0),
            root_started: AtomicBool::new(false),
            last_root_event: Mutex::new(None),
        }
    }

    /// Gathers facts and publishes the resulting state if it changed.
    pub fn recompute(&self) {
        if self.machine.stop_requested() {
            return;
        }
        let (generation, findings, cluster) = self.gather();
        let mut gate = self.machine.lock();
        if gate.stopped || generation < gate.decided_gen {
            return;
        }
        gate.decided_gen = generation;
        let proposed = self.machine.decide(&findings, cluster);
        self.machine.apply(&mut gate, proposed);
    }

    /// Ends the startup grace period, then recomputes and reports the outcome.
    pub fn finish_startup(&self) {
        let outcome = loop {
            if self.machine.stop_requested() {
                return;
            }
            let (generation, findings, cluster) = self.gather();
            let mut gate = self.machine.lock();
            if gate.stopped {
                return;
            }
            gate.app_starting = false;
            if generation < gate.decided_gen {
                // Newer facts were decided while starting; gather again.
                continue;
            }
            gate.decided_gen = generation;
            let proposed = self.machine.decide(&findings, cluster);
            self.machine.apply(&mut gate, proposed);
            break self.machine.current();
        };
        if outcome.is(AppState::ActiveReady) {
            tracing::debug!("startup check found ready state");
        } else {
            tracing::error!(state = %outcome.state, desc = %outcome.short_desc, "failure during startup");
        }
    }

    /// Forces `STOPPING`, bypassing the startup suppression.
    pub fn stop(&self, detail: StateDetail) {
        self.machine.request_stop();
        let mut gate = self.machine.lock();
        self.machine.force_stop(&mut gate, detail);
    }

    /// Reads host and cluster facts outside the machine lock.
    fn gather(&self) -> (u64, Findings, ClusterFact) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let findings = self.collector.evaluate(
            self.host.modules(),
            self.host.services(),
            &self.requirements,
        );
        (generation, findings, self.cluster.fact())
    }

    pub fn root_started(&self) -> bool {
        self.root_started.load(Ordering::SeqCst)
    }

    pub fn mark_root_started(&self) {
        self.root_started.store(true, Ordering::SeqCst);
    }

    /// Records the latest root-process event kind.
    pub fn record_root_event(&self, kind: RootEventKind) {
        *self
            .last_root_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(kind);
        if kind == RootEventKind::Started {
            self.mark_root_started();
        }
    }

    pub fn last_root_event(&self) -> Option<RootEventKind> {
        *self
            .last_root_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
