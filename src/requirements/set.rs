//! # Required modules and services.
//!
//! [`RequirementSet`] is built once per activation from the configured defaults,
//! an optional override list (replaces the defaults) and an optional additional list
//! (appended). It is never mutated afterwards; reconfiguration builds a new set.
//!
//! ## Rules
//! - Override and addition apply independently: override first, then append.
//! - Lists are comma separated; whitespace after a comma is ignored.
//! - An empty value yields an empty list, not an error.
//! - Pattern order is preserved (it drives diagnostic ordering only).

use std::time::Duration;

use crate::error::ConfigError;
use crate::requirements::RequiredPattern;

/// Immutable set of requirements evaluated by every readiness check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequirementSet {
    /// Module symbolic-name patterns.
    pub modules: Vec<RequiredPattern>,
    /// Service identifier patterns.
    pub services: Vec<RequiredPattern>,
    /// Startup grace period before failures are reported.
    pub startup_grace: Duration,
}

/// Raw list inputs for one requirement category.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListSource<'a> {
    /// Baseline entries.
    pub defaults: &'a [String],
    /// Replaces `defaults` entirely when present.
    pub overrides: Option<&'a str>,
    /// Appended after defaults/overrides when present.
    pub additional: Option<&'a str>,
}

impl RequirementSet {
    /// Builds a requirement set from both category sources.
    pub fn load(
        modules: ListSource<'_>,
        services: ListSource<'_>,
        startup_grace: Duration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            modules: compile_all(&resolve(modules))?,
            services: compile_all(&resolve(services))?,
            startup_grace,
        })
    }
}

/// Applies override/additional semantics to one category.
fn resolve(src: ListSource<'_>) -> Vec<String> {
    let mut out = match src.overrides {
        Some(raw) => parse_list(raw),
        None => src.defaults.to_vec(),
    };
    if let Some(raw) = src.additional {
        out.extend(parse_list(raw));
    }
    out
}

fn compile_all(patterns: &[String]) -> Result<Vec<RequiredPattern>, ConfigError> {
    patterns.iter().map(|p| RequiredPattern::compile(p)).collect()
}

/// Splits a comma separated list, dropping whitespace that follows a comma.
///
/// Trailing empty entries are discarded.
///
/// # Example
/// ```
/// use healthvisor::parse_list;
///
/// assert_eq!(parse_list("a, b,c"), vec!["a", "b", "c"]);
/// assert!(parse_list("").is_empty());
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<String> = raw
        .split(',')
        .enumerate()
        .map(|(i, item)| if i == 0 { item } else { item.trim_start() })
        .map(str::to_string)
        .collect();
    while items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}
