//! # Host collaborator contract.
//!
//! The engine never loads modules or registers services itself. It reads live facts
//! from a [`ComponentHost`] and reacts to the events the host delivers to the
//! [`Listener`]s it registers.
//!
//! ## Rules
//! - Enumerations may fail while the host is in flux; the engine degrades.
//! - Listener callbacks run synchronously on the delivering thread and must be
//!   allowed to call back into the host (enumerate) without deadlocking.
//! - `is_started` reports whether the root process already completed its boot.

use std::sync::Arc;

use crate::error::EnumerationError;
use crate::events::{ClusterEventKind, ModuleEvent, RootEventKind, ServiceEventKind};
use crate::facts::{ModuleFact, ServiceFact};

/// Event stream a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Module,
    Service,
    Root,
}

/// Capability interface implemented by the engine's event handlers.
///
/// Every method defaults to a no-op so each handler implements only the stream it
/// is registered for.
pub trait Listener: Send + Sync + 'static {
    fn on_module_event(&self, _event: &ModuleEvent) {}

    fn on_service_event(&self, _kind: ServiceEventKind) {}

    fn on_root_event(&self, _kind: RootEventKind) {}

    /// Returns true if the event was consumed.
    fn on_cluster_event(&self, _kind: ClusterEventKind) -> bool {
        false
    }
}

/// The application host whose readiness is being determined.
pub trait ComponentHost: Send + Sync + 'static {
    /// Enumerates the live modules.
    fn modules(&self) -> Result<Vec<ModuleFact>, EnumerationError>;

    /// Enumerates the registered services.
    fn services(&self) -> Result<Vec<ServiceFact>, EnumerationError>;

    /// True once the root process reported it finished starting.
    fn is_started(&self) -> bool;

    /// Registers a listener on one event stream.
    fn add_listener(&self, stream: Stream, listener: Arc<dyn Listener>);

    /// Removes a listener previously added with [`add_listener`](Self::add_listener).
    fn remove_listener(&self, stream: Stream, listener: &Arc<dyn Listener>);
}
