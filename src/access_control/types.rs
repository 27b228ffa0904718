//! Access control types
//!
//! Values produced by the resolver and the knobs that steer it.

use serde::Serialize;
use std::fmt;

/// Default name of the repository that grants administrative rights
pub const DEFAULT_ADMIN_REPO: &str = "gitolite-admin";

/// Permission that makes a user an administrator on the admin repo
pub const DEFAULT_ADMIN_PERM: &str = "RW+";

/// Default limit on group nesting during expansion
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// An effective `(permission, ref)` pair for a repo/user combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccessGrant {
    pub perm: String,
    /// `None` means the rule applies to all refs
    #[serde(rename = "ref")]
    pub refex: Option<String>,
}

impl AccessGrant {
    pub fn new(perm: impl Into<String>, refex: Option<&str>) -> Self {
        Self {
            perm: perm.into(),
            refex: refex.map(str::to_string),
        }
    }

    /// Check if the grant covers every ref
    pub fn is_unrestricted(&self) -> bool {
        self.refex.is_none()
    }
}

impl fmt::Display for AccessGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.refex {
            Some(refex) => write!(f, "{} {}", self.perm, refex),
            None => write!(f, "{}", self.perm),
        }
    }
}

/// A concrete repository a user can reach, with the permission granted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoGrant {
    pub name: String,
    pub perm: String,
}

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Deepest group nesting followed before giving up
    pub max_depth: usize,
    /// Repository consulted by `is_admin`
    pub admin_repo: String,
    /// Permission (with no ref) that marks an administrator
    pub admin_perm: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            admin_repo: DEFAULT_ADMIN_REPO.to_string(),
            admin_perm: DEFAULT_ADMIN_PERM.to_string(),
        }
    }
}
