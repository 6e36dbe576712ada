//! Error types for the rules crate.

use sluice_notation::Arg;
use thiserror::Error;

/// Errors raised while building rules.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Why an argument list was refused by [`check`](crate::check).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// The number of arguments differs from the number of rule sets.
    #[error("expected {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The argument at `position` failed its rule set.
    #[error("argument {position} ({value}) failed validation")]
    Rejected { position: usize, value: Arg },
}

/// A single value failed its rule set and no default was supplied.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("value {value} does not satisfy its rules")]
pub struct ValidationFailed {
    /// The offending value.
    pub value: Arg,
}

/// Result type for rule construction.
pub type Result<T> = std::result::Result<T, RuleError>;
