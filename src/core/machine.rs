//! # Readiness state machine: decision, startup suppression, publication.
//!
//! ## Decision order (first match wins)
//! ```text
//! missing modules / module failures / fragment failures ─► ACTIVE_NOT_READY "Not all modules started [..] [..] [..]"
//! missing services                                      ─► ACTIVE_NOT_READY "Required services not all started [..]"
//! cluster enabled && !up                                ─► ACTIVE_NOT_READY "This node can not yet join the cluster"
//! otherwise                                             ─► ACTIVE_READY     "<name> ready"
//! ```
//!
//! ## Publication rules
//! - A proposal equal (by value) to the published snapshot is a no-op.
//! - While `app_starting` holds, only `ACTIVE_READY` is published (and clears the
//!   flag); anything else is discarded and `STARTING` stays visible.
//! - Once a stop was requested, nothing but the forced `STOPPING` is published.
//! - Every publication swaps a fresh `Arc<StateDetail>` into the watch channel and
//!   emits a [`Transition`] to observers.
//!
//! Callers gather facts without the lock, then hold [`ReadinessMachine::lock`] only
//! across decide-then-publish. Each gathering carries a generation; a decision built
//! from facts older than the last one taken is discarded, so the latest facts win.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::cluster::ClusterFact;
use crate::events::Transition;
use crate::facts::Findings;
use crate::observers::ObserverSet;
use crate::snapshot::{AppState, SnapshotReader, StateDetail};

pub(crate) const CLUSTER_NOT_UP_DESC: &str = "This node can not yet join the cluster";

/// Mutable machine state, only reachable through the lock.
#[derive(Debug)]
pub(crate) struct Gate {
    /// Suppress non-ready decisions (boot in progress).
    pub app_starting: bool,
    /// `STOPPING` was published; no further automatic transitions.
    pub stopped: bool,
    /// Fact generation of the latest decision taken under the lock.
    pub decided_gen: u64,
    /// Sequence number of the next transition.
    next_seq: u64,
}

/// Publishes readiness snapshots under the startup-suppression policy.
pub(crate) struct ReadinessMachine {
    gate: Mutex<Gate>,
    stop_requested: AtomicBool,
    tx: watch::Sender<Arc<StateDetail>>,
    observers: ObserverSet,
    ready_desc: String,
}

impl ReadinessMachine {
    pub fn new(initial: StateDetail, ready_desc: String, observers: ObserverSet) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self {
            gate: Mutex::new(Gate {
                app_starting: true,
                stopped: false,
                decided_gen: 0,
                next_seq: 0,
            }),
            stop_requested: AtomicBool::new(false),
            tx,
            observers,
            ready_desc,
        }
    }

    /// Acquires the compute-then-publish lock.
    pub fn lock(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Currently published snapshot (lock-free with respect to the gate).
    pub fn current(&self) -> Arc<StateDetail> {
        Arc::clone(&self.tx.borrow())
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader::new(self.tx.subscribe())
    }

    pub fn observers(&self) -> &ObserverSet {
        &self.observers
    }

    /// Marks a stop as pending; in-flight recomputations stop publishing.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Maps findings and the cluster fact to a proposed snapshot.
    pub fn decide(&self, findings: &Findings, cluster: ClusterFact) -> StateDetail {
        if !findings.modules_ok() {
            StateDetail::new(
                AppState::ActiveNotReady,
                format!(
                    "Not all modules started {} {} {}",
                    bracketed(&findings.missing_modules),
                    bracketed(&findings.module_failures),
                    bracketed(&findings.fragment_failures),
                ),
            )
        } else if !findings.services_ok() {
            StateDetail::new(
                AppState::ActiveNotReady,
                format!(
                    "Required services not all started {}",
                    bracketed(&findings.missing_services)
                ),
            )
        } else if cluster.blocks_readiness() {
            StateDetail::new(AppState::ActiveNotReady, CLUSTER_NOT_UP_DESC)
        } else {
            StateDetail::new(AppState::ActiveReady, self.ready_desc.clone())
        }
    }

    /// Applies a proposal under the startup-suppression policy.
    ///
    /// Returns the published transition, if any.
    pub fn apply(&self, gate: &mut Gate, proposed: StateDetail) -> Option<Arc<Transition>> {
        if gate.stopped || self.stop_requested() {
            return None;
        }
        let current = self.current();
        if *current == proposed {
            return None;
        }
        if gate.app_starting {
            if !proposed.is(AppState::ActiveReady) {
                tracing::debug!(proposed = %proposed, "startup in progress; keeping STARTING");
                return None;
            }
            gate.app_starting = false;
        }
        Some(self.publish(gate, current, proposed))
    }

    /// Publishes `detail` unconditionally (bypasses suppression) and stops the machine.
    pub fn force_stop(&self, gate: &mut Gate, detail: StateDetail) -> Option<Arc<Transition>> {
        gate.app_starting = false;
        gate.stopped = true;
        let current = self.current();
        if *current == detail {
            return None;
        }
        Some(self.publish(gate, current, detail))
    }

    fn publish(
        &self,
        gate: &mut Gate,
        current: Arc<StateDetail>,
        next: StateDetail,
    ) -> Arc<Transition> {
        let next = Arc::new(next);
        let transition = Arc::new(Transition::new(gate.next_seq, current, Arc::clone(&next)));
        gate.next_seq += 1;

        if transition.left_ready() {
            if next.is(AppState::ActiveNotReady) {
                tracing::info!(state = %next.state, desc = %next.short_desc, "system changed to a not ready state");
            } else {
                tracing::warn!(state = %next.state, desc = %next.short_desc, "system changed state");
            }
        }
        if transition.became_ready() {
            tracing::info!(desc = %next.short_desc, "system ready");
        }
        tracing::debug!(seq = transition.seq, from = %transition.from, to = %next, "state published");

        self.tx.send_replace(next);
        self.observers.emit(Arc::clone(&transition));
        transition
    }
}

/// Renders a list as `[a, b, c]`.
fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ReadinessMachine {
        ReadinessMachine::new(
            StateDetail::new(AppState::Starting, "App starting"),
            "App ready".to_string(),
            ObserverSet::empty(),
        )
    }

    fn cluster(enabled: bool, up: bool) -> ClusterFact {
        ClusterFact {
            enabled,
            attached: true,
            up,
        }
    }

    fn ready() -> StateDetail {
        StateDetail::new(AppState::ActiveReady, "App ready")
    }

    fn not_ready(desc: &str) -> StateDetail {
        StateDetail::new(AppState::ActiveNotReady, desc)
    }

    #[test]
    fn test_decision_order() {
        let m = machine();
        let mut f = Findings {
            missing_modules: vec!["repo-(a|b)".into()],
            module_failures: vec!["core".into()],
            fragment_failures: vec![],
            missing_services: vec!["svc-a".into()],
        };
        assert_eq!(
            m.decide(&f, cluster(true, false)),
            not_ready("Not all modules started [repo-(a|b)] [core] []")
        );

        f.missing_modules.clear();
        f.module_failures.clear();
        assert_eq!(
            m.decide(&f, cluster(true, false)),
            not_ready("Required services not all started [svc-a]")
        );

        f.missing_services.clear();
        assert_eq!(m.decide(&f, cluster(true, false)), not_ready(CLUSTER_NOT_UP_DESC));
        assert_eq!(m.decide(&f, cluster(true, true)), ready());
        assert_eq!(m.decide(&f, cluster(false, false)), ready());
        assert_eq!(m.decide(&f, cluster(false, true)), ready());
    }

    #[test]
    fn test_starting_suppresses_not_ready() {
        let m = machine();
        let mut gate = m.lock();
        assert!(m.apply(&mut gate, not_ready("x")).is_none());
        assert!(m.current().is(AppState::Starting));
        assert!(gate.app_starting);
    }

    #[test]
    fn test_first_ready_clears_starting() {
        let m = machine();
        let mut gate = m.lock();
        let t = m.apply(&mut gate, ready()).unwrap();
        assert!(t.became_ready());
        assert!(!gate.app_starting);

        let t = m.apply(&mut gate, not_ready("x")).unwrap();
        assert!(t.left_ready());
        assert!(m.current().is(AppState::ActiveNotReady));
    }

    #[test]
    fn test_idempotent_publication() {
        let m = machine();
        let mut gate = m.lock();
        gate.app_starting = false;
        assert!(m.apply(&mut gate, not_ready("x")).is_some());
        assert!(m.apply(&mut gate, not_ready("x")).is_none());
        // Same state, different description, publishes.
        let t = m.apply(&mut gate, not_ready("y")).unwrap();
        assert_eq!(t.seq, 1);
    }

    #[test]
    fn test_force_stop_bypasses_suppression_and_freezes() {
        let m = machine();
        let mut gate = m.lock();
        assert!(gate.app_starting);
        let t = m
            .force_stop(&mut gate, StateDetail::new(AppState::Stopping, "App stopping"))
            .unwrap();
        assert!(t.to.is(AppState::Stopping));
        assert!(m.apply(&mut gate, ready()).is_none());
        assert!(m.current().is(AppState::Stopping));
    }

    #[test]
    fn test_requested_stop_blocks_publication() {
        let m = machine();
        m.request_stop();
        let mut gate = m.lock();
        assert!(m.apply(&mut gate, ready()).is_none());
        assert!(m.current().is(AppState::Starting));
    }
}
