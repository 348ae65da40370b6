//! Runtime core: readiness engine and lifecycle.
//!
//! The only public API from this module is [`HealthService`] (with its
//! [`HealthServiceBuilder`]), which wires the engine into a host, answers queries
//! and handles deactivation.
//!
//! Internal modules:
//! - [`engine`]: shared state and the compute-then-publish step;
//! - [`machine`]: decision order, startup suppression, publication;
//! - [`handlers`]: named listener types registered with the host and the cluster;
//! - [`startup`]: one-shot delayed startup check;
//! - [`builder`]: activation;
//! - [`service`]: lifecycle hooks and query surface.

mod builder;
mod engine;
mod handlers;
mod machine;
mod service;
mod startup;

pub use builder::HealthServiceBuilder;
pub use service::HealthService;
