//! # Fact collector: required patterns vs. live modules and services.
//!
//! Given the live modules and services at one point in time, [`FactCollector`]
//! works out which requirements are unmet.
//!
//! ## Rules
//! - A module pattern is satisfied once at least one live module's symbolic name
//!   fully matches it. Every matching module must additionally be in its expected
//!   state (`Active` for modules, `Resolved` for fragments), otherwise its name is
//!   recorded as a module or fragment failure.
//! - A service pattern is satisfied by the first live service with a matching
//!   identifier (reported alias or rule-derived alias); the scan for that pattern
//!   stops there.
//! - A failed enumeration leaves the whole category missing. It is logged at
//!   debug level and never returned as an error.
//! - Diagnostics follow requirement order.

use std::sync::Arc;

use crate::error::EnumerationError;
use crate::facts::{AliasRule, ModuleFact, NoAlias, ServiceFact};
use crate::requirements::{RequiredPattern, RequirementSet};

/// Outcome of one evaluation. Each list holds pattern text or module names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// Module patterns no live module matched.
    pub missing_modules: Vec<String>,
    /// Matching regular modules that are not active.
    pub module_failures: Vec<String>,
    /// Matching fragments that are not resolved.
    pub fragment_failures: Vec<String>,
    /// Service patterns no live service matched.
    pub missing_services: Vec<String>,
}

impl Findings {
    /// True if every required module is present and in its expected state.
    pub fn modules_ok(&self) -> bool {
        self.missing_modules.is_empty()
            && self.module_failures.is_empty()
            && self.fragment_failures.is_empty()
    }

    /// True if every required service is registered.
    pub fn services_ok(&self) -> bool {
        self.missing_services.is_empty()
    }
}

/// Evaluates a [`RequirementSet`] against live facts.
#[derive(Clone)]
pub struct FactCollector {
    aliases: Arc<dyn AliasRule>,
}

impl Default for FactCollector {
    fn default() -> Self {
        Self::new(Arc::new(NoAlias))
    }
}

impl FactCollector {
    /// Creates a collector that applies `aliases` to service identifiers.
    pub fn new(aliases: Arc<dyn AliasRule>) -> Self {
        Self { aliases }
    }

    /// Evaluates both categories. Enumeration failures degrade, never propagate.
    pub fn evaluate(
        &self,
        modules: Result<Vec<ModuleFact>, EnumerationError>,
        services: Result<Vec<ServiceFact>, EnumerationError>,
        required: &RequirementSet,
    ) -> Findings {
        let mut findings = Findings::default();

        match modules {
            Ok(live) => self.check_modules(&live, &required.modules, &mut findings),
            Err(e) => {
                tracing::debug!(error = %e, "module enumeration failed; treating required modules as missing");
                findings.missing_modules = pattern_names(&required.modules);
            }
        }

        match services {
            Ok(live) => {
                findings.missing_services = self.missing_services(&live, &required.services)
            }
            Err(e) => {
                tracing::debug!(error = %e, "service enumeration failed; treating required services as missing");
                findings.missing_services = pattern_names(&required.services);
            }
        }
        findings
    }

    fn check_modules(
        &self,
        live: &[ModuleFact],
        required: &[RequiredPattern],
        findings: &mut Findings,
    ) {
        for req in required {
            let mut matched = false;
            for module in live.iter().filter(|m| req.is_match(&m.symbolic_name)) {
                matched = true;
                if module.is_operational() {
                    continue;
                }
                let name = module.symbolic_name.clone();
                if module.is_fragment() {
                    findings.fragment_failures.push(name);
                } else {
                    findings.module_failures.push(name);
                }
            }
            if !matched {
                findings.missing_modules.push(req.as_str().to_string());
            }
        }
    }

    fn missing_services(&self, live: &[ServiceFact], required: &[RequiredPattern]) -> Vec<String> {
        required
            .iter()
            .filter(|req| !live.iter().any(|svc| self.service_matches(svc, req)))
            .map(|req| req.as_str().to_string())
            .collect()
    }

    fn service_matches(&self, svc: &ServiceFact, req: &RequiredPattern) -> bool {
        svc.aliases.iter().any(|id| {
            req.is_match(id) || self.aliases.expand(id).iter().any(|alt| req.is_match(alt))
        })
    }
}

fn pattern_names(patterns: &[RequiredPattern]) -> Vec<String> {
    patterns.iter().map(|p| p.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::facts::{ActivationState, PrefixAlias};
    use crate::requirements::ListSource;

    fn reqs(modules: &str, services: &str) -> RequirementSet {
        RequirementSet::load(
            ListSource {
                overrides: Some(modules),
                ..Default::default()
            },
            ListSource {
                overrides: Some(services),
                ..Default::default()
            },
            Duration::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn test_all_required_modules_present_and_active() {
        let f = FactCollector::default().evaluate(
            Ok(vec![
                ModuleFact::normal("core", ActivationState::Active),
                ModuleFact::normal("repo-b", ActivationState::Active),
            ]),
            Ok(vec![]),
            &reqs("core, repo-(a|b)", ""),
        );
        assert!(f.modules_ok());
        assert!(f.services_ok());
    }

    #[test]
    fn test_unmatched_pattern_is_missing() {
        let f = FactCollector::default().evaluate(
            Ok(vec![ModuleFact::normal("core", ActivationState::Active)]),
            Ok(vec![]),
            &reqs("core, repo-(a|b)", ""),
        );
        assert_eq!(f.missing_modules, vec!["repo-(a|b)"]);
        assert!(f.module_failures.is_empty());
    }

    #[test]
    fn test_fragment_must_be_resolved_module_must_be_active() {
        let f = FactCollector::default().evaluate(
            Ok(vec![
                ModuleFact::fragment("jetty-fragment", ActivationState::Resolved),
                ModuleFact::normal("core", ActivationState::Resolved),
            ]),
            Ok(vec![]),
            &reqs("jetty-fragment, core", ""),
        );
        assert!(f.missing_modules.is_empty());
        assert!(f.fragment_failures.is_empty());
        assert_eq!(f.module_failures, vec!["core"]);

        let f = FactCollector::default().evaluate(
            Ok(vec![ModuleFact::fragment("jetty-fragment", ActivationState::Other)]),
            Ok(vec![]),
            &reqs("jetty-fragment", ""),
        );
        assert_eq!(f.fragment_failures, vec!["jetty-fragment"]);
        assert!(f.missing_modules.is_empty());
    }

    #[test]
    fn test_active_fragment_counts_as_fragment_failure() {
        let f = FactCollector::default().evaluate(
            Ok(vec![ModuleFact::fragment("jetty-fragment", ActivationState::Active)]),
            Ok(vec![]),
            &reqs("jetty-fragment", ""),
        );
        assert_eq!(f.fragment_failures, vec!["jetty-fragment"]);
        assert!(f.missing_modules.is_empty());
        assert!(f.module_failures.is_empty());
        assert!(!f.modules_ok());
    }

    #[test]
    fn test_every_match_must_be_operational() {
        let f = FactCollector::default().evaluate(
            Ok(vec![
                ModuleFact::normal("repo-a", ActivationState::Active),
                ModuleFact::normal("repo-b", ActivationState::Other),
            ]),
            Ok(vec![]),
            &reqs("repo-(a|b)", ""),
        );
        assert!(f.missing_modules.is_empty());
        assert_eq!(f.module_failures, vec!["repo-b"]);
    }

    #[test]
    fn test_service_regex_matching() {
        let collector = FactCollector::default();
        let required = reqs("", "svc-(a|b)");
        for (id, ok) in [("svc-a", true), ("svc-b", true), ("svc-c", false)] {
            let f = collector.evaluate(Ok(vec![]), Ok(vec![ServiceFact::new(id)]), &required);
            assert_eq!(f.services_ok(), ok, "service {id}");
        }
    }

    #[test]
    fn test_service_matched_by_any_alias() {
        let f = FactCollector::default().evaluate(
            Ok(vec![]),
            Ok(vec![ServiceFact::with_aliases(["old.router", "new.router"])]),
            &reqs("", r"new\.router"),
        );
        assert!(f.services_ok());
    }

    #[test]
    fn test_alias_rule_derives_identifier() {
        let required = reqs("", r"org\.current\.router");
        let live = vec![ServiceFact::new("org.legacy.router")];

        let plain = FactCollector::default().evaluate(Ok(vec![]), Ok(live.clone()), &required);
        assert_eq!(plain.missing_services, vec![r"org\.current\.router"]);

        let aliased = FactCollector::new(Arc::new(PrefixAlias::new("org.legacy.", "org.current.")))
            .evaluate(Ok(vec![]), Ok(live), &required);
        assert!(aliased.services_ok());
    }

    #[test]
    fn test_enumeration_failure_degrades_to_missing() {
        let f = FactCollector::default().evaluate(
            Err(EnumerationError::modules("flux")),
            Err(EnumerationError::services("shutting down")),
            &reqs("core", "svc-a, svc-b"),
        );
        assert_eq!(f.missing_modules, vec!["core"]);
        assert_eq!(f.missing_services, vec!["svc-a", "svc-b"]);
    }

    #[test]
    fn test_missing_services_follow_requirement_order() {
        let f = FactCollector::default().evaluate(
            Ok(vec![]),
            Ok(vec![ServiceFact::new("b")]),
            &reqs("", "c, b, a"),
        );
        assert_eq!(f.missing_services, vec!["c", "a"]);
    }
}
