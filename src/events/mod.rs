//! Engine events: inbound host lifecycle events and outbound transitions.
//!
//! ## Contents
//! - [`ModuleEvent`], [`ServiceEventKind`], [`RootEventKind`], [`ClusterEventKind`]
//!   inbound event model and recompute filters
//! - [`Transition`] outbound notification emitted on every publication
//!
//! ## Quick reference
//! - **Producers of inbound events**: the host (through registered listeners) and
//!   the cluster collaborator.
//! - **Consumers of transitions**: [`ObserverSet`](crate::ObserverSet) workers.

mod event;
mod transition;

pub use event::{ClusterEventKind, ModuleEvent, ModuleEventKind, RootEventKind, ServiceEventKind};
pub use transition::Transition;
