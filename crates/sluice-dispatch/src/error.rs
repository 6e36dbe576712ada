//! Error types for the dispatch crate.

use std::fmt;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pagination step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Meta,
    Window,
    Fetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Meta => "computing page metadata",
            Stage::Window => "applying limit and offset",
            Stage::Fetch => "fetching rows",
        })
    }
}

/// Failures that propagate out of a filter pass.
///
/// Unusable parameters never produce an `Error`; they are skipped and
/// recorded in [`Filter::report`](crate::Filter::report). Only failures
/// raised by the storage backend reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("operation '{name}' failed (parameter '{key}')")]
    Operation {
        name: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("backend failed while {stage}")]
    Backend {
        stage: Stage,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn operation(name: &str, key: &str, source: anyhow::Error) -> Self {
        Error::Operation {
            name: name.to_string(),
            key: key.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn backend(stage: Stage) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Error::Backend {
            stage,
            source: source.into(),
        }
    }
}

/// Result type for filtering and pagination.
pub type Result<T> = std::result::Result<T, Error>;
