//! Error types for gitolite-admin
//!
//! This module defines the error hierarchy used throughout the crate.
//! Each component gets its own `thiserror` type; `AppError` ties them
//! together for callers that do not care which stage failed.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong on a malformed configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The line needs exactly one `=`
    ExpectedKeyValue,
    /// A body line appeared before any `repo` declaration
    OutsideRepo,
    /// `repo` was given without any repository names
    MissingRepoName,
    /// The left side of an access rule is not `perm` or `perm ref`
    InvalidAccessRule,
}

impl SyntaxErrorKind {
    pub const fn message(&self) -> &'static str {
        match self {
            SyntaxErrorKind::ExpectedKeyValue => "expected key/value pair",
            SyntaxErrorKind::OutsideRepo => "expected to be inside a repo block",
            SyntaxErrorKind::MissingRepoName => "expected at least one repository name",
            SyntaxErrorKind::InvalidAccessRule => "expected a permission and an optional ref",
        }
    }
}

/// A line of the configuration violates the grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {} in '{text}'", .kind.message())]
pub struct SyntaxError {
    /// 1-based line number in the source text
    pub line: usize,
    /// The raw, un-normalized line
    pub text: String,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub fn new(line: usize, text: impl Into<String>, kind: SyntaxErrorKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }
}

/// A clause looked like a regex but failed to compile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid regex pattern '{clause}': {reason}")]
pub struct PatternError {
    pub clause: String,
    pub reason: String,
}

impl PatternError {
    pub fn new(clause: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            reason: reason.into(),
        }
    }
}

/// Group expansion could not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("group '{group}' is nested deeper than the limit of {max_depth}")]
    DepthExceeded { group: String, max_depth: usize },
}

/// A named entry does not exist in the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} '{name}' is not defined")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub name: String,
}

impl NotFoundError {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            kind: "group",
            name: name.into(),
        }
    }

    pub fn repo(name: impl Into<String>) -> Self {
        Self {
            kind: "repo",
            name: name.into(),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for parsing
pub type ParseResult<T> = std::result::Result<T, SyntaxError>;
