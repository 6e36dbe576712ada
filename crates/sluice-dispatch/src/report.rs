//! Per-parameter diagnostics for a filter pass.

use sluice_notation::NotationError;
use sluice_rules::Violation;
use thiserror::Error;

use crate::operation::ArgumentError;

/// Why a parameter did not reach the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("malformed value: {0}")]
    Malformed(NotationError),

    #[error("no operation with this name")]
    UnknownOperation,

    #[error("operation is not on the allow-list")]
    NotAllowed,

    #[error("call budget exhausted")]
    BudgetExhausted,

    #[error("arguments rejected: {0}")]
    Rejected(Violation),

    #[error("unusable arguments: {0}")]
    BadArguments(ArgumentError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Applied,
    Skipped(SkipReason),
}

/// What happened to one request parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The parameter name as submitted.
    pub key: String,
    /// Operation name derived from the key.
    pub operation: String,
    pub status: Status,
}

impl Outcome {
    /// Returns `true` if the operation ran.
    pub fn is_applied(&self) -> bool {
        matches!(self.status, Status::Applied)
    }

    /// Why the parameter was skipped, if it was.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            Status::Skipped(reason) => Some(reason),
            Status::Applied => None,
        }
    }
}
