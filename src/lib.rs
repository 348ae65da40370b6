//! # healthvisor
//!
//! **Healthvisor** is a readiness/liveness aggregator for modular application hosts.
//!
//! It watches a host's module lifecycle, service registry, root-process events and
//! an optional cluster membership subsystem, and keeps one published snapshot of the
//! application state (`STARTING`, `ACTIVE_READY`, `ACTIVE_NOT_READY`, `STOPPING`)
//! with a short human-readable reason.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐  ┌──────────────────┐
//!  │ module events │  │service events │  │  root events  │  │ cluster events   │
//!  │   (host)      │  │   (host)      │  │   (host)      │  │ (collaborator)   │
//!  └──────┬────────┘  └──────┬────────┘  └──────┬────────┘  └────────┬─────────┘
//!         ▼                  ▼                  ▼                    ▼
//!  ModuleEventHandler ServiceEventHandler RootEventHandler   ClusterEventHandler
//!         └──────────────────┴─────────┬────────┴────────────────────┘
//!                                      ▼
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │  Engine                                                                   │
//! │  - RequirementSet  (compiled patterns + startup grace)                    │
//! │  - FactCollector   (host.modules()/services() vs requirements → Findings) │
//! │  - ClusterLiaison  (enabled / attached / up)                              │
//! │  - ReadinessMachine (decide → suppress while starting → publish)          │
//! │  - StartupCheck    (one-shot timer ending the grace period)               │
//! └──────────────────────────────┬────────────────────────────────────────────┘
//!                                ▼
//!               ┌──────────────────────────────────┐
//!               │  watch channel (Arc<StateDetail>)│──► snapshot() / payload() / watch()
//!               └────────────────┬─────────────────┘
//!                                ▼
//!                          ObserverSet (per-observer queues)
//!                       ┌────────┼─────────┐
//!                       ▼        ▼         ▼
//!                    worker1  worker2   workerN
//!                       ▼        ▼         ▼
//!                   obs1.on_  obs2.on_  obsN.on_
//!                  transition transition transition
//! ```
//!
//! ### Lifecycle
//! ```text
//! activate ──► STARTING (app_starting = true)
//!
//! root STARTED ──► recompute
//!   ├─ ACTIVE_READY   ─► published, app_starting = false
//!   └─ not ready      ─► suppressed, startup check armed (grace period)
//!                           └─ fires ─► app_starting = false, recompute, publish
//!
//! every later event ──► recompute ──► publish if changed
//!
//! deactivate ──► STOPPING (forced, final)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Engine**        | Activation, queries, cluster hooks, deactivation.             | [`HealthService`], [`HealthServiceBuilder`] |
//! | **Requirements**  | Full-match regex patterns and list parsing.                   | [`RequiredPattern`], [`RequirementSet`]     |
//! | **Host contract** | Live facts and event delivery.                                | [`ComponentHost`], [`Listener`]             |
//! | **Cluster**       | Membership collaborator contract.                             | [`ClusterMembership`]                       |
//! | **Observers**     | Hook into published transitions.                              | [`Observe`], [`Transition`]                 |
//! | **Errors**        | Typed activation and collaborator errors.                     | [`ActivationError`], [`ConfigError`]        |
//! | **Configuration** | Display name, default requirements, timers.                   | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference only)_.
//!
//! ## Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use healthvisor::{Config, HealthService};
//!
//! # async fn run(host: Arc<dyn healthvisor::ComponentHost>) -> Result<(), healthvisor::ActivationError> {
//! let svc = HealthService::builder(Config::default())
//!     .activate(host, [("requiredServices", "org.example.router, org.example.repo")])?;
//!
//! let mut reader = svc.watch();
//! while let Some(state) = reader.changed().await {
//!     println!("{state}");
//! }
//! svc.shutdown().await;
//! # Ok(())
//! # }
//! ```
mod cluster;
mod config;
mod core;
mod error;
mod events;
mod facts;
mod host;
mod observers;
mod requirements;
mod snapshot;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use cluster::{ClusterFact, ClusterMembership, LISTENER_ID};
pub use config::{
    Config, KEY_ADDITIONAL_MODULES, KEY_ADDITIONAL_SERVICES, KEY_REQUIRED_MODULES, KEY_REQUIRED_SERVICES,
    KEY_STARTUP_GRACE_MILLIS,
};
pub use core::{HealthService, HealthServiceBuilder};
pub use error::{ActivationError, ClusterError, ConfigError, EnumerationError};
pub use events::{ClusterEventKind, ModuleEvent, ModuleEventKind, RootEventKind, ServiceEventKind, Transition};
pub use facts::{ActivationState, AliasRule, ModuleFact, ModuleKind, NoAlias, PrefixAlias, ServiceFact};
pub use host::{ComponentHost, Listener, Stream};
pub use observers::{Observe, ObserverSet};
pub use requirements::{ListSource, RequiredPattern, RequirementSet, parse_list};
pub use snapshot::{AppState, SnapshotReader, StateDetail};

// Optional: expose a simple built-in transition printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
