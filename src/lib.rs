//! gitolite-admin
//!
//! Reads, rewrites and queries the `conf/gitolite.conf` file of a gitolite
//! admin repository.
//!
//! ## Features
//!
//! - **Comment-preserving parser** turning the configuration into a typed
//!   [`Document`]
//! - **Canonical serializer** writing a [`Document`] back out; parsing the
//!   output yields the same document
//! - **Access resolver** expanding nested groups, regex aliases and `@all`
//!   to answer "what can this user do on this repository"
//!
//! Running `git`, managing key files and pushing changes are left to the
//! caller.
//!
//! ## Example
//!
//! ```
//! use gitolite_admin::{AccessResolver, parse, serialize};
//!
//! let text = "\
//! @admins = alice
//!
//! repo gitolite-admin
//! \tRW+  = @admins
//! ";
//!
//! let doc = parse(text).unwrap();
//! let resolver = AccessResolver::new(&doc).unwrap();
//! assert!(resolver.is_admin("alice").unwrap());
//! assert!(!resolver.is_admin("bob").unwrap());
//! assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
//! ```

pub mod access_control;
pub mod conf;
pub mod config;
pub mod error;
pub mod util;

// Re-export main types
pub use access_control::{AccessGrant, AccessResolver, RepoGrant, matches};
pub use conf::{Document, parse, serialize};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
