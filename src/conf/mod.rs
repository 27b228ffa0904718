//! `gitolite.conf` document model, parser and serializer
//!
//! ```text
//! @devs = alice bob          # group
//!
//! repo demo @projects        # repo block
//!     RW+ master = alice
//!     RW         = @devs
//!     option deny-rules = 1
//! ```
//!
//! [`parse`] and [`serialize`] are inverse up to whitespace: reparsing the
//! serialized form of a parsed document yields an equal document.

pub mod document;
pub mod parser;
pub mod serializer;

pub use document::{ALL_GROUP, Access, Document, Entry, Group, Repo, RepoEntry, Setting};
pub use parser::parse;
pub use serializer::serialize;

use crate::error::SyntaxError;
use std::str::FromStr;

impl FromStr for Document {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
