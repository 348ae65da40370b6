//! Requirement patterns and the immutable set built at activation.
//!
//! ## Contents
//! - [`RequiredPattern`] compiled full-match regex
//! - [`RequirementSet`] required modules/services plus the startup grace period
//! - [`parse_list`] comma separated list parsing used by configuration

mod pattern;
mod set;

pub use pattern::RequiredPattern;
pub use set::{ListSource, RequirementSet, parse_list};
