//! Declarative configuration.
//!
//! A configuration file carries [`Settings`] and the allow-list, so the
//! operations an endpoint accepts can be reviewed without reading code:
//!
//! ```yaml
//! settings:
//!   max_per_page: 50
//!   default_max_calls: 5
//!
//! operations:
//!   - name: sort
//!     rules:
//!       - { in: [id, age, name] }
//!       - { in: ["1", "-1"] }
//!   - name: where
//!     max_calls: 3
//!     rules:
//!       - { matches: "^[a-zA-Z_]+$" }
//!       - { in: ["=", "!=", "<", ">", "<=", ">=", LIKE] }
//!       - any
//! ```
//!
//! Both sections are optional. Without `operations` the filter runs in
//! permissive mode and every catalog operation may be called.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sluice_dispatch::{Backend, Filter, OperationSpec, Operations, Settings};
use sluice_notation::RawParameters;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("operation '{0}' is declared more than once")]
    DuplicateOperation(String),
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

/// Settings plus an optional allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub operations: Vec<OperationSpec>,
}

impl Config {
    /// Parses a YAML document.
    ///
    /// Regular expressions in `matches` rules are compiled here, so a bad
    /// pattern fails the load rather than the request.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Reads and parses a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&yaml, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message: e.to_string(),
        })?;

        let mut seen = HashSet::new();
        for spec in &config.operations {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateOperation(spec.name.clone()));
            }
        }

        debug!(
            path = ?path,
            operations = config.operations.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Returns `true` if the configuration declares an allow-list.
    pub fn is_restricted(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Builds a filter for one request with these settings and declarations.
    pub fn filter<'o, B: Backend>(
        &self,
        backend: B,
        operations: &'o Operations<B>,
        raw: &RawParameters,
    ) -> Filter<'o, B> {
        Filter::with_settings(backend, operations, raw, self.settings.clone())
            .allow_all(&self.operations)
    }
}
