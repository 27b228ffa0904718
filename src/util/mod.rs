//! Utility functions shared across the crate.

use crate::access_control::patterns::is_regex;
use std::fmt;

/// How a name in the configuration is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// `@name`
    Group,
    /// Contains regex metacharacters
    Pattern,
    /// Plain name compared for equality
    Literal,
}

impl IdentifierKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Group => "group",
            IdentifierKind::Pattern => "pattern",
            IdentifierKind::Literal => "literal",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a user, repository or group name
pub fn classify(name: &str) -> IdentifierKind {
    if name.starts_with('@') {
        IdentifierKind::Group
    } else if is_regex(name) {
        IdentifierKind::Pattern
    } else {
        IdentifierKind::Literal
    }
}

/// Check if `name` is usable as a repository, user or key file name.
///
/// Must start with an ASCII letter, followed by letters, digits, `.`, `-`
/// or `_`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        }
        _ => false,
    }
}
