//! Error types for the notation crate.

use thiserror::Error;

/// Why a raw parameter value could not be read as an argument list.
///
/// These are per-entry conditions: the caller drops the offending entry
/// and keeps parsing the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// A bracket appears outside of a `[...]` list, e.g. `[flower` or `flo]wer`.
    #[error("stray bracket in {value:?}")]
    StrayBracket { value: String },

    /// A quoted section ends in an unescaped backslash.
    #[error("trailing escape inside quotes in {value:?}")]
    TrailingEscape { value: String },
}

/// Result type for notation parsing.
pub type Result<T> = std::result::Result<T, NotationError>;
