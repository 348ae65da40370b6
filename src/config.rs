//! # Engine configuration.
//!
//! Provides [`Config`] centralized settings for the readiness engine, and the
//! string-keyed property layer applied on top of it at activation.
//!
//! ## Property keys
//! | Key                          | Effect                                   |
//! |------------------------------|------------------------------------------|
//! | `requiredModules`            | replaces [`Config::default_modules`]     |
//! | `requiredServices`           | replaces [`Config::default_services`]    |
//! | `additionalRequiredModules`  | appended to the module requirements      |
//! | `additionalRequiredServices` | appended to the service requirements     |
//! | `startupGraceMillis`         | replaces [`Config::startup_grace`]       |
//!
//! Unknown keys are ignored. A malformed grace period or pattern fails activation.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;
use crate::requirements::{ListSource, RequirementSet};

pub const KEY_REQUIRED_MODULES: &str = "requiredModules";
pub const KEY_REQUIRED_SERVICES: &str = "requiredServices";
pub const KEY_ADDITIONAL_MODULES: &str = "additionalRequiredModules";
pub const KEY_ADDITIONAL_SERVICES: &str = "additionalRequiredServices";
pub const KEY_STARTUP_GRACE_MILLIS: &str = "startupGraceMillis";

/// Global configuration for the readiness engine.
///
/// ## Field semantics
/// - `display_name`: prefix of the built-in descriptions ("<name> starting", "<name> ready")
/// - `default_modules` / `default_services`: baseline requirement patterns
/// - `startup_grace`: window after root start during which failures stay hidden
/// - `already_started_delay`: delay of the startup check when the host had already
///   started at activation time
#[derive(Clone, Debug)]
pub struct Config {
    /// Name used in state descriptions.
    pub display_name: String,

    /// Module patterns required unless overridden by `requiredModules`.
    pub default_modules: Vec<String>,

    /// Service patterns required unless overridden by `requiredServices`.
    pub default_services: Vec<String>,

    /// Maximum time after root start for requirements to be met before failures
    /// are reported instead of `STARTING`.
    pub startup_grace: Duration,

    /// Startup-check delay used when the host is already started at activation.
    ///
    /// Short and fixed: it only decouples the check from early wiring.
    pub already_started_delay: Duration,
}

impl Config {
    /// Applies string properties and compiles the resulting [`RequirementSet`].
    ///
    /// # Example
    /// ```
    /// use healthvisor::Config;
    ///
    /// let cfg = Config { default_modules: vec!["core".into()], ..Config::default() };
    /// let reqs = cfg
    ///     .requirements([("additionalRequiredModules", "repo-(a|b)"), ("startupGraceMillis", "500")])
    ///     .unwrap();
    /// assert_eq!(reqs.modules.len(), 2);
    /// assert_eq!(reqs.startup_grace.as_millis(), 500);
    /// ```
    pub fn requirements<I, K, V>(&self, props: I) -> Result<RequirementSet, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let props: HashMap<String, String> = props
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let get = |key: &str| props.get(key).map(String::as_str);

        let startup_grace = match get(KEY_STARTUP_GRACE_MILLIS) {
            Some(raw) => parse_millis(raw)?,
            None => self.startup_grace,
        };

        RequirementSet::load(
            ListSource {
                defaults: &self.default_modules,
                overrides: get(KEY_REQUIRED_MODULES),
                additional: get(KEY_ADDITIONAL_MODULES),
            },
            ListSource {
                defaults: &self.default_services,
                overrides: get(KEY_REQUIRED_SERVICES),
                additional: get(KEY_ADDITIONAL_SERVICES),
            },
            startup_grace,
        )
    }

    /// Description published while starting.
    pub fn starting_desc(&self) -> String {
        format!("{} starting", self.display_name)
    }

    /// Description published when ready.
    pub fn ready_desc(&self) -> String {
        format!("{} ready", self.display_name)
    }

    /// Description published at deactivation.
    pub fn stopping_desc(&self) -> String {
        format!("{} stopping", self.display_name)
    }
}

fn parse_millis(raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidGracePeriod {
            value: raw.to_string(),
        })
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `display_name = "Application"`
    /// - no default module or service requirements
    /// - `startup_grace = 15s`
    /// - `already_started_delay = 2s`
    fn default() -> Self {
        Self {
            display_name: "Application".to_string(),
            default_modules: Vec::new(),
            default_services: Vec::new(),
            startup_grace: Duration::from_millis(15_000),
            already_started_delay: Duration::from_millis(2_000),
        }
    }
}
