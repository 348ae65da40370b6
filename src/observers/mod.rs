//! # Observers of published readiness transitions.
//!
//! ## Architecture
//! ```text
//! ReadinessMachine::apply() ── publish ──► watch channel (SnapshotReader)
//!                                  │
//!                                  └──► ObserverSet::emit(Transition)
//!                                            │
//!                                  ┌─────────┼─────────┐
//!                                  ▼         ▼         ▼
//!                              LogWriter   Pager    Custom ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
