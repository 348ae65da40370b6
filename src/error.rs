//! Error types used by the healthvisor engine and its collaborators.
//!
//! This module defines the error enums surfaced by the crate:
//!
//! - [`ConfigError`]: a configuration value could not be applied (fatal to activation).
//! - [`ActivationError`]: the engine could not be activated.
//! - [`EnumerationError`]: the host could not list its modules or services.
//! - [`ClusterError`]: the cluster collaborator refused a listener registration.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logs/metrics.
//! Only [`ConfigError`] and [`ActivationError`] ever reach the caller; the other two
//! are recovered locally and degrade the computed state.

use thiserror::Error;

/// # Errors produced while applying configuration.
///
/// These are fatal to [`activate`](crate::HealthServiceBuilder::activate): the host
/// sees the error on its activation failure path and no engine is created.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `startupGraceMillis` is not a non-negative integer.
    #[error("invalid startup grace period {value:?}: expected milliseconds as an integer")]
    InvalidGracePeriod {
        /// The raw configured value.
        value: String,
    },

    /// A required module/service pattern does not compile as a regex.
    #[error("invalid requirement pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The regex compiler error.
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use healthvisor::ConfigError;
    ///
    /// let err = ConfigError::InvalidGracePeriod { value: "soon".into() };
    /// assert_eq!(err.as_label(), "config_invalid_grace_period");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidGracePeriod { .. } => "config_invalid_grace_period",
            ConfigError::InvalidPattern { .. } => "config_invalid_pattern",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigError::InvalidGracePeriod { value } => format!("grace period: {value}"),
            ConfigError::InvalidPattern { pattern, .. } => format!("pattern: {pattern}"),
        }
    }
}

/// # Errors produced while activating the engine.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActivationError {
    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Activation happened outside a tokio runtime; the startup timer cannot be armed.
    #[error("activate must be called from within a tokio runtime")]
    NoRuntime,
}

impl ActivationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivationError::Config(e) => e.as_label(),
            ActivationError::NoRuntime => "activation_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActivationError::Config(e) => e.as_message(),
            ActivationError::NoRuntime => "no tokio runtime".to_string(),
        }
    }
}

/// # The host could not enumerate its live modules or services.
///
/// Expected while the host is in flux (typically during shutdown).
/// The engine treats the affected category as "all missing" and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{what} enumeration unavailable: {reason}")]
pub struct EnumerationError {
    /// Which enumeration failed (`"modules"` or `"services"`).
    pub what: &'static str,
    /// Host-supplied reason.
    pub reason: String,
}

impl EnumerationError {
    /// Creates a failed module enumeration.
    pub fn modules(reason: impl Into<String>) -> Self {
        Self {
            what: "modules",
            reason: reason.into(),
        }
    }

    /// Creates a failed service enumeration.
    pub fn services(reason: impl Into<String>) -> Self {
        Self {
            what: "services",
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self.what {
            "modules" => "enumeration_modules_unavailable",
            _ => "enumeration_services_unavailable",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        format!("{}: {}", self.what, self.reason)
    }
}

/// # Errors returned by a [`ClusterMembership`](crate::ClusterMembership) collaborator.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// The collaborator refused to register the listener.
    #[error("listener {listener:?} registration refused: {reason}")]
    RegistrationRefused {
        /// Listener id that was being registered.
        listener: String,
        /// Collaborator-supplied reason.
        reason: String,
    },
}

impl ClusterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use healthvisor::ClusterError;
    ///
    /// let err = ClusterError::RegistrationRefused { listener: "health".into(), reason: "closed".into() };
    /// assert_eq!(err.as_label(), "cluster_registration_refused");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ClusterError::RegistrationRefused { .. } => "cluster_registration_refused",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ClusterError::RegistrationRefused { listener, reason } => {
                format!("listener={listener} refused: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let err = ActivationError::from(ConfigError::InvalidGracePeriod {
            value: "x".into(),
        });
        assert_eq!(err.as_label(), "config_invalid_grace_period");
        assert_eq!(ActivationError::NoRuntime.as_label(), "activation_no_runtime");
        assert_eq!(
            EnumerationError::services("flux").as_label(),
            "enumeration_services_unavailable"
        );
        assert_eq!(
            EnumerationError::modules("flux").as_label(),
            "enumeration_modules_unavailable"
        );
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidPattern {
            pattern: "(".into(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.as_message(), "pattern: (");
    }
}
