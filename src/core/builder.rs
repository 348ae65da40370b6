use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    config::Config,
    core::{engine::Engine, machine::ReadinessMachine, service::HealthService, startup::StartupCheck},
    error::ActivationError,
    facts::{AliasRule, FactCollector, NoAlias},
    host::ComponentHost,
    observers::{Observe, ObserverSet},
    snapshot::{AppState, StateDetail},
};

/// Builder for activating a [`HealthService`] with optional features.
pub struct HealthServiceBuilder {
    cfg: Config,
    observers: Vec<Arc<dyn Observe>>,
    aliases: Arc<dyn AliasRule>,
}

impl HealthServiceBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            observers: Vec::new(),
            aliases: Arc::new(NoAlias),
        }
    }

    /// Sets transition observers.
    ///
    /// Observers receive every published transition through dedicated workers
    /// with bounded queues.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Sets the rule deriving extra service identifiers (default: none).
    pub fn with_alias_rule(mut self, rule: Arc<dyn AliasRule>) -> Self {
        self.aliases = rule;
        self
    }

    /// Applies `properties`, wires the engine into `host` and returns the running service.
    ///
    /// Must be called from within a tokio runtime (the startup check and observer
    /// workers are spawned on it). If the host has already started, the startup
    /// check is armed with [`Config::already_started_delay`].
    pub fn activate<I, K, V>(
        self,
        host: Arc<dyn ComponentHost>,
        properties: I,
    ) -> Result<Arc<HealthService>, ActivationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let rt = Handle::try_current().map_err(|_| ActivationError::NoRuntime)?;
        let requirements = self.cfg.requirements(properties)?;

        let machine = ReadinessMachine::new(
            StateDetail::new(AppState::Starting, self.cfg.starting_desc()),
            self.cfg.ready_desc(),
            ObserverSet::new(self.observers, &rt),
        );
        let engine = Arc::new(Engine::new(
            requirements,
            host,
            FactCollector::new(self.aliases),
            machine,
            StartupCheck::new(rt),
        ));

        let service = Arc::new(HealthService::wire(self.cfg, engine));
        tracing::info!(
            modules = service.requirements().modules.len(),
            services = service.requirements().services.len(),
            grace_ms = service.requirements().startup_grace.as_millis() as u64,
            "health service activated"
        );
        Ok(service)
    }
}
