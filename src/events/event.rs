//! # Host lifecycle events consumed by the engine.
//!
//! Four streams feed the engine:
//! - **Module events**: a module was added, started, stopped, resolved or unresolved
//! - **Service events**: a service was registered, modified or is unregistering
//! - **Root events**: the host process itself started, failed or reported progress
//! - **Cluster events**: this instance is running in, or has failed out of, the cluster
//!
//! Only some kinds warrant a readiness recomputation; each kind answers that
//! question itself (`triggers_recompute`) so the dispatch rules live in one place.
//!
//! ## Example
//! ```rust
//! use healthvisor::{ActivationState, ModuleEvent, ModuleEventKind, ModuleFact};
//!
//! let ev = ModuleEvent::new(
//!     ModuleEventKind::Resolved,
//!     ModuleFact::fragment("web-fragment", ActivationState::Resolved),
//! );
//! assert!(ev.triggers_recompute());
//! ```

use crate::facts::ModuleFact;

/// Module lifecycle event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleEventKind {
    Added,
    Started,
    Stopped,
    Resolved,
    Unresolved,
}

/// A module lifecycle event together with the affected module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEvent {
    pub kind: ModuleEventKind,
    pub module: ModuleFact,
}

impl ModuleEvent {
    pub fn new(kind: ModuleEventKind, module: ModuleFact) -> Self {
        Self { kind, module }
    }

    /// Started/stopped/unresolved always matter; resolved matters for fragments only.
    pub fn triggers_recompute(&self) -> bool {
        match self.kind {
            ModuleEventKind::Started | ModuleEventKind::Stopped | ModuleEventKind::Unresolved => {
                true
            }
            ModuleEventKind::Resolved => self.module.is_fragment(),
            ModuleEventKind::Added => false,
        }
    }
}

/// Service lifecycle event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEventKind {
    Registered,
    Modified,
    Unregistering,
    /// Properties changed so that a filtered listener no longer matches.
    ModifiedEndMatch,
}

impl ServiceEventKind {
    pub fn triggers_recompute(self) -> bool {
        matches!(
            self,
            ServiceEventKind::Registered
                | ServiceEventKind::Modified
                | ServiceEventKind::Unregistering
        )
    }
}

/// Root-process event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootEventKind {
    Started,
    Error,
    Stopped,
    PackagesRefreshed,
    StartLevelChanged,
    Warning,
    Info,
}

impl RootEventKind {
    /// Informational kinds never trigger a recomputation.
    pub fn triggers_recompute(self) -> bool {
        !matches!(
            self,
            RootEventKind::PackagesRefreshed
                | RootEventKind::StartLevelChanged
                | RootEventKind::Warning
                | RootEventKind::Info
        )
    }
}

/// Cluster membership event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterEventKind {
    /// This instance is running as a cluster member.
    InstanceRunning,
    /// This instance failed out of the cluster.
    InstanceFailed,
    /// Any other membership notification (another node joined, recovery, ...).
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ActivationState;

    #[test]
    fn test_module_event_filter() {
        let normal = ModuleFact::normal("core", ActivationState::Active);
        let fragment = ModuleFact::fragment("frag", ActivationState::Resolved);

        for kind in [
            ModuleEventKind::Started,
            ModuleEventKind::Stopped,
            ModuleEventKind::Unresolved,
        ] {
            assert!(ModuleEvent::new(kind, normal.clone()).triggers_recompute());
        }
        assert!(!ModuleEvent::new(ModuleEventKind::Added, normal.clone()).triggers_recompute());
        assert!(!ModuleEvent::new(ModuleEventKind::Resolved, normal).triggers_recompute());
        assert!(ModuleEvent::new(ModuleEventKind::Resolved, fragment).triggers_recompute());
    }

    #[test]
    fn test_service_and_root_filters() {
        assert!(ServiceEventKind::Registered.triggers_recompute());
        assert!(ServiceEventKind::Unregistering.triggers_recompute());
        assert!(ServiceEventKind::Modified.triggers_recompute());
        assert!(!ServiceEventKind::ModifiedEndMatch.triggers_recompute());

        assert!(RootEventKind::Started.triggers_recompute());
        assert!(RootEventKind::Error.triggers_recompute());
        assert!(!RootEventKind::Info.triggers_recompute());
        assert!(!RootEventKind::StartLevelChanged.triggers_recompute());
    }
}
