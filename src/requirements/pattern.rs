//! # Compiled requirement pattern.
//!
//! A requirement is written as a regex (e.g. `repo-(a|b)`) and must match a whole
//! name, never a substring. The regex is compiled once, anchored, and reused for
//! every check.

use std::fmt;

use regex::Regex;

use crate::error::ConfigError;

/// A required module/service name pattern with full-match semantics.
#[derive(Clone, Debug)]
pub struct RequiredPattern {
    source: String,
    regex: Regex,
}

impl RequiredPattern {
    /// Compiles `pattern` as an anchored regex.
    ///
    /// # Example
    /// ```
    /// use healthvisor::RequiredPattern;
    ///
    /// let p = RequiredPattern::compile(r"mod\.core").unwrap();
    /// assert!(p.is_match("mod.core"));
    /// assert!(!p.is_match("mod.core.extra"));
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `name` matches the whole pattern.
    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern as it was configured.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for RequiredPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RequiredPattern {}

impl fmt::Display for RequiredPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let p = RequiredPattern::compile("svc-(a|b)").unwrap();
        assert!(p.is_match("svc-a"));
        assert!(p.is_match("svc-b"));
        assert!(!p.is_match("svc-c"));
        assert!(!p.is_match("xsvc-a"));

        // Top-level alternation must not escape the anchors.
        let p = RequiredPattern::compile("a|b").unwrap();
        assert!(p.is_match("a"));
        assert!(!p.is_match("ab"));
    }

    #[test]
    fn test_escaped_dot_matches_only_dotted_name() {
        let p = RequiredPattern::compile(r"mod\.core").unwrap();
        assert!(p.is_match("mod.core"));
        assert!(!p.is_match("modxcore"));
        assert!(!p.is_match("mod.core2"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = RequiredPattern::compile("repo-(a|b").unwrap_err();
        assert_eq!(err.as_label(), "config_invalid_pattern");
    }
}
