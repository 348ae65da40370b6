//! Cluster membership collaborator contract.

use std::sync::Arc;

use crate::error::ClusterError;
use crate::host::Listener;

/// The cluster-membership subsystem, as far as readiness needs it.
///
/// Implementations deliver `InstanceRunning` / `InstanceFailed` through
/// [`Listener::on_cluster_event`] on every registered listener.
pub trait ClusterMembership: Send + Sync + 'static {
    /// True if clustering is configured for this instance.
    fn is_enabled(&self) -> bool;

    /// True if cluster participation is already running.
    fn is_started(&self) -> bool;

    /// Requests that cluster participation start. Fire-and-forget.
    fn start_cluster_management(&self);

    /// Registers a named listener.
    fn register(&self, listener_id: &str, listener: Arc<dyn Listener>) -> Result<(), ClusterError>;

    /// Removes a named listener. Unknown ids are ignored.
    fn unregister(&self, listener_id: &str);
}
