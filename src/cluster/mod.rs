//! Cluster membership: collaborator contract and the liaison that tracks it.
//!
//! ## Contents
//! - [`ClusterMembership`] collaborator trait
//! - [`ClusterLiaison`], [`ClusterFact`] attach/detach tracking and the "cluster is up" fact

mod liaison;
mod membership;

pub use liaison::{ClusterFact, ClusterLiaison, LISTENER_ID};
pub use membership::ClusterMembership;
