//! Pattern matching for repo aliases and group members
//!
//! A clause is a regex iff it contains one of `^[]*?()$`; anything else is
//! compared for exact equality. Regex clauses are unanchored unless they
//! carry their own anchors.

use crate::error::PatternError;
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

/// Characters that turn a clause into a regex
const REGEX_CHARS: &[char] = &['^', '[', ']', '*', '?', '(', ')', '$'];

/// Check whether a clause is treated as a regex
pub fn is_regex(clause: &str) -> bool {
    clause.contains(REGEX_CHARS)
}

/// Test `candidate` against `clause`, compiling the clause if it is a regex
pub fn matches(candidate: &str, clause: &str) -> Result<bool, PatternError> {
    if candidate == clause {
        return Ok(true);
    }
    if !is_regex(clause) {
        return Ok(false);
    }
    Ok(compile(clause)?.is_match(candidate))
}

fn compile(clause: &str) -> Result<Regex, PatternError> {
    Regex::new(clause).map_err(|e| PatternError::new(clause, e.to_string()))
}

/// Pre-compiled set of regex clauses
///
/// Literal clauses need no compilation and are never stored.
#[derive(Debug, Default)]
pub struct PatternMatcher {
    compiled: HashMap<String, Regex>,
}

impl PatternMatcher {
    /// Compile every regex clause up front, failing on the first bad one
    pub fn new<'a, I>(clauses: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut compiled = HashMap::new();
        for clause in clauses {
            if is_regex(clause) && !compiled.contains_key(clause) {
                compiled.insert(clause.to_string(), compile(clause)?);
            }
        }
        Ok(Self { compiled })
    }

    /// Create an empty matcher (every regex clause is compiled on demand)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same contract as [`matches`], reusing compiled clauses
    pub fn matches(&self, candidate: &str, clause: &str) -> Result<bool, PatternError> {
        if candidate == clause {
            return Ok(true);
        }
        if !is_regex(clause) {
            return Ok(false);
        }
        let hit = match self.compiled.get(clause) {
            Some(regex) => regex.is_match(candidate),
            None => compile(clause)?.is_match(candidate),
        };
        trace!(candidate, clause, hit, "Regex clause evaluated");
        Ok(hit)
    }

    /// Number of compiled regex clauses
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
