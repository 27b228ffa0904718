//! Access resolver
//!
//! Computes effective permissions from a parsed [`Document`]:
//!
//! 1. Direct rules: repo blocks whose aliases match the repository, with an
//!    access line naming the user literally.
//! 2. Group expansion: the same lookup repeated for every group the
//!    repository belongs to, every group the user belongs to, and every pair
//!    of the two. `@all` is always part of both sides.
//!
//! Group membership is expanded recursively with a visited set, so cyclic
//! definitions terminate. Nesting deeper than
//! [`ResolverOptions::max_depth`] fails with [`ResolutionError`].

use crate::access_control::patterns::{PatternMatcher, is_regex};
use crate::access_control::types::{AccessGrant, RepoGrant, ResolverOptions};
use crate::conf::{ALL_GROUP, Document};
use crate::error::{ResolutionError, Result};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Resolver bound to one parsed document
///
/// Every regex clause in the document is compiled when the resolver is
/// built. The resolver never mutates anything, so it can be shared freely
/// between threads.
pub struct AccessResolver<'a> {
    document: &'a Document,
    matcher: PatternMatcher,
    /// Group name to the union of its members, across all declarations
    groups: HashMap<&'a str, Vec<&'a str>>,
    /// Group names in order of first declaration
    group_order: Vec<&'a str>,
    options: ResolverOptions,
}

impl<'a> AccessResolver<'a> {
    /// Create a resolver with default options
    pub fn new(document: &'a Document) -> Result<Self> {
        Self::with_options(document, ResolverOptions::default())
    }

    /// Create a resolver with explicit options
    pub fn with_options(document: &'a Document, options: ResolverOptions) -> Result<Self> {
        let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut group_order = Vec::new();
        for group in document.groups() {
            let members = groups.entry(group.name.as_str()).or_insert_with(|| {
                group_order.push(group.name.as_str());
                Vec::new()
            });
            members.extend(group.members.iter().map(String::as_str));
        }

        let clauses = groups
            .values()
            .flatten()
            .copied()
            .chain(document.repos().flat_map(|r| r.aliases.iter().map(String::as_str)));
        let matcher = PatternMatcher::new(clauses)?;

        debug!(
            groups = group_order.len(),
            regex_clauses = matcher.len(),
            "Built access resolver"
        );

        Ok(Self {
            document,
            matcher,
            groups,
            group_order,
            options,
        })
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Groups `identifier` belongs to, directly or through nested groups.
    ///
    /// The result is ordered by first group declaration and free of
    /// duplicates.
    pub fn resolve_groups(&self, identifier: &str) -> Result<Vec<String>> {
        let mut result = Vec::new();
        for &group in &self.group_order {
            let mut visited = HashSet::new();
            if self.belongs_to(identifier, group, &mut visited, 0)? {
                result.push(group.to_string());
            }
        }
        trace!(identifier, groups = ?result, "Resolved groups");
        Ok(result)
    }

    fn belongs_to(
        &self,
        identifier: &str,
        group: &'a str,
        visited: &mut HashSet<&'a str>,
        depth: usize,
    ) -> Result<bool> {
        if depth >= self.options.max_depth {
            return Err(ResolutionError::DepthExceeded {
                group: group.to_string(),
                max_depth: self.options.max_depth,
            }
            .into());
        }
        visited.insert(group);

        let Some(members) = self.groups.get(group) else {
            return Ok(false);
        };

        for &member in members {
            if self.matcher.matches(identifier, member)? {
                return Ok(true);
            }
            if member.starts_with('@')
                && self.groups.contains_key(member)
                && !visited.contains(member)
                && self.belongs_to(identifier, member, visited, depth + 1)?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Effective permissions of `user` on `repo`, including group expansion
    pub fn resolve_access(&self, repo: &str, user: &str) -> Result<Vec<AccessGrant>> {
        self.resolve_access_with(repo, user, true)
    }

    /// Effective permissions, optionally without group expansion.
    ///
    /// Duplicate grants are dropped, keeping the first occurrence; direct
    /// grants come first.
    pub fn resolve_access_with(
        &self,
        repo: &str,
        user: &str,
        include_groups: bool,
    ) -> Result<Vec<AccessGrant>> {
        debug!(repo, user, include_groups, "Resolving access");

        let mut grants = Vec::new();
        self.direct_access(repo, user, &mut grants)?;

        if include_groups {
            let repo_groups = self.groups_with_all(repo)?;
            let user_groups = self.groups_with_all(user)?;

            for repo_group in &repo_groups {
                self.direct_access(repo_group, user, &mut grants)?;
            }
            for user_group in &user_groups {
                self.direct_access(repo, user_group, &mut grants)?;
            }
            for repo_group in &repo_groups {
                for user_group in &user_groups {
                    self.direct_access(repo_group, user_group, &mut grants)?;
                }
            }
        }

        let mut seen = HashSet::new();
        grants.retain(|grant| seen.insert(grant.clone()));
        Ok(grants)
    }

    fn groups_with_all(&self, identifier: &str) -> Result<Vec<String>> {
        let mut groups = self.resolve_groups(identifier)?;
        if !groups.iter().any(|g| g == ALL_GROUP) {
            groups.push(ALL_GROUP.to_string());
        }
        Ok(groups)
    }

    /// Rules naming `user` literally in every repo block matching `repo`
    fn direct_access(&self, repo: &str, user: &str, grants: &mut Vec<AccessGrant>) -> Result<()> {
        for block in self.document.repos() {
            if !self.matches_any(repo, &block.aliases)? {
                continue;
            }
            for access in block.access_rules().filter(|a| a.grants_to(user)) {
                trace!(repo, user, perm = %access.perm, "Matched access rule");
                grants.push(AccessGrant::new(&access.perm, access.refex.as_deref()));
            }
        }
        Ok(())
    }

    fn matches_any(&self, candidate: &str, clauses: &[String]) -> Result<bool> {
        for clause in clauses {
            if self.matcher.matches(candidate, clause)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check if `user` holds the admin permission, unrestricted by ref, on
    /// the admin repository
    pub fn is_admin(&self, user: &str) -> Result<bool> {
        let grants = self.resolve_access(&self.options.admin_repo, user)?;
        Ok(grants
            .iter()
            .any(|g| g.perm == self.options.admin_perm && g.is_unrestricted()))
    }

    /// Concrete repositories `user` has a rule on, with the granted permission.
    ///
    /// For each repo block, the first rule naming the user, one of the
    /// user's groups or `@all` counts. Group aliases expand to their literal
    /// members; regex aliases inside groups are skipped.
    pub fn list_user_repos(&self, user: &str) -> Result<Vec<RepoGrant>> {
        let mut names = self.resolve_groups(user)?;
        names.push(user.to_string());
        if !names.iter().any(|n| n == ALL_GROUP) {
            names.push(ALL_GROUP.to_string());
        }

        let mut result = Vec::new();
        for block in self.document.repos() {
            for name in &names {
                let Some(access) = block.access_rules().find(|a| a.grants_to(name)) else {
                    continue;
                };
                for alias in &block.aliases {
                    if alias.starts_with('@') {
                        let mut visited = HashSet::new();
                        for member in self.literal_members(alias, &mut visited) {
                            result.push(RepoGrant {
                                name: member.to_string(),
                                perm: access.perm.clone(),
                            });
                        }
                    } else {
                        result.push(RepoGrant {
                            name: alias.clone(),
                            perm: access.perm.clone(),
                        });
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        result.retain(|grant| seen.insert(grant.clone()));
        debug!(user, repos = result.len(), "Listed user repositories");
        Ok(result)
    }

    /// Non-regex members of a group, following nested groups
    fn literal_members(&self, group: &'a str, visited: &mut HashSet<&'a str>) -> Vec<&'a str> {
        if !visited.insert(group) {
            return Vec::new();
        }
        let Some(members) = self.groups.get(group) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for &member in members {
            if member.starts_with('@') {
                result.extend(self.literal_members(member, visited));
            } else if !is_regex(member) {
                result.push(member);
            }
        }
        result
    }
}

/// Groups `identifier` belongs to in `document`
pub fn resolve_groups(document: &Document, identifier: &str) -> Result<Vec<String>> {
    AccessResolver::new(document)?.resolve_groups(identifier)
}

/// Effective permissions of `user` on `repo` in `document`
pub fn resolve_access(
    document: &Document,
    repo: &str,
    user: &str,
    include_groups: bool,
) -> Result<Vec<AccessGrant>> {
    AccessResolver::new(document)?.resolve_access_with(repo, user, include_groups)
}

/// Check if `user` is an administrator in `document`
pub fn is_admin(document: &Document, user: &str) -> Result<bool> {
    AccessResolver::new(document)?.is_admin(user)
}

/// Repositories `user` can reach in `document`
pub fn list_user_repos(document: &Document, user: &str) -> Result<Vec<RepoGrant>> {
    AccessResolver::new(document)?.list_user_repos(user)
}
