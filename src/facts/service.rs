//! # Live service facts and identifier aliasing.
//!
//! A registered service may be known under more than one identifier. The host
//! reports the identifiers it knows about; an [`AliasRule`] can derive further
//! equivalent identifiers (e.g. a renamed vendor prefix) at match time.

use std::fmt;

/// A registered service as seen at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFact {
    /// Equivalent identifiers; any of them may satisfy a requirement.
    pub aliases: Vec<String>,
}

impl ServiceFact {
    /// Service known by a single identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            aliases: vec![id.into()],
        }
    }

    /// Service known by several identifiers.
    pub fn with_aliases<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Derives extra identifiers for a service identifier.
///
/// Implementations must be cheap and side-effect free; they run for every
/// service on every check.
pub trait AliasRule: Send + Sync + 'static {
    /// Returns identifiers equivalent to `id` (excluding `id` itself).
    fn expand(&self, id: &str) -> Vec<String>;
}

/// No aliasing: services match only by their reported identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlias;

impl AliasRule for NoAlias {
    fn expand(&self, _id: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Rewrites a leading prefix to produce an alternate identifier.
///
/// Only a prefix at the start of the identifier is rewritten; this is not a
/// replace-all substitution. Implement [`AliasRule`] directly for other rewrites.
///
/// # Example
/// ```
/// use healthvisor::{AliasRule, PrefixAlias};
///
/// let rule = PrefixAlias::new("org.legacy.", "org.current.");
/// assert_eq!(rule.expand("org.legacy.router"), vec!["org.current.router"]);
/// assert!(rule.expand("com.other.router").is_empty());
/// // Occurrences past the start are left alone.
/// assert!(rule.expand("com.org.legacy.router").is_empty());
/// ```
#[derive(Clone)]
pub struct PrefixAlias {
    from: String,
    to: String,
}

impl PrefixAlias {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl AliasRule for PrefixAlias {
    fn expand(&self, id: &str) -> Vec<String> {
        match id.strip_prefix(self.from.as_str()) {
            Some(rest) => vec![format!("{}{rest}", self.to)],
            None => Vec::new(),
        }
    }
}

impl fmt::Debug for PrefixAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefixAlias({} -> {})", self.from, self.to)
    }
}
