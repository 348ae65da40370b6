//! Live facts about the host and their evaluation against requirements.
//!
//! ## Contents
//! - [`ModuleFact`], [`ModuleKind`], [`ActivationState`] live module model
//! - [`ServiceFact`], [`AliasRule`], [`PrefixAlias`], [`NoAlias`] live service model
//! - [`FactCollector`], [`Findings`] evaluation of a [`RequirementSet`](crate::RequirementSet)

mod collector;
mod module;
mod service;

pub use collector::{FactCollector, Findings};
pub use module::{ActivationState, ModuleFact, ModuleKind};
pub use service::{AliasRule, NoAlias, PrefixAlias, ServiceFact};
