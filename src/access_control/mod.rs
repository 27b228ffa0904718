//! Access control module
//!
//! Computes what access the configuration grants. Enforcement is left to
//! gitolite itself; this module only answers questions about the document.
//!
//! ## Resolution Model
//!
//! For a repository `R` and a user `U`, rules are collected from:
//!
//! 1. repo blocks matching `R` with a rule naming `U`
//! 2. repo blocks matching a group of `R` with a rule naming `U`
//! 3. repo blocks matching `R` with a rule naming a group of `U`
//! 4. repo blocks matching a group of `R` with a rule naming a group of `U`
//!
//! `@all` counts as a group of every repository and every user.
//!
//! ## Example
//!
//! ```
//! use gitolite_admin::access_control::{AccessGrant, AccessResolver};
//! use gitolite_admin::conf::parse;
//!
//! let doc = parse("@devs = alice bob\n\nrepo demo\n\tRW = @devs\n").unwrap();
//! let resolver = AccessResolver::new(&doc).unwrap();
//! assert_eq!(
//!     resolver.resolve_access("demo", "bob").unwrap(),
//!     vec![AccessGrant::new("RW", None)]
//! );
//! ```

pub mod patterns;
pub mod resolver;
pub mod types;

pub use patterns::{PatternMatcher, is_regex, matches};
pub use resolver::{AccessResolver, is_admin, list_user_repos, resolve_access, resolve_groups};
pub use types::{AccessGrant, RepoGrant, ResolverOptions};
