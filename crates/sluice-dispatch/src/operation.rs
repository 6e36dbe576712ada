//! Operation handlers and the catalog that maps names to them.
//!
//! An operation is a named unit of query mutation. Request parameters
//! select operations by name, and the filter core calls them with the
//! parsed argument list:
//!
//! ```rust
//! use sluice_dispatch::{Args, Operations};
//!
//! #[derive(Clone, Default)]
//! struct Query {
//!     limit: Option<i64>,
//! }
//! # impl sluice_dispatch::Backend for Query {
//! #     type Row = ();
//! #     fn apply_order(&mut self, _: &str, _: sluice_dispatch::Dir) -> anyhow::Result<()> {
//! #         Ok(())
//! #     }
//! #     fn apply_limit_offset(&mut self, _: u64, _: u64) -> anyhow::Result<()> {
//! #         Ok(())
//! #     }
//! #     fn total_and_meta(
//! #         &mut self,
//! #         pp: u64,
//! #         p: u64,
//! #     ) -> anyhow::Result<sluice_dispatch::PageMeta> {
//! #         Ok(sluice_dispatch::PageMeta::new(p, pp, 0))
//! #     }
//! #     fn fetch_rows(&mut self) -> anyhow::Result<Vec<()>> { Ok(vec![]) }
//! # }
//!
//! let ops = Operations::new().operation("top", 1, |q: &mut Query, args: Args<'_>| {
//!     q.limit = Some(args.int(0)?);
//!     Ok(())
//! });
//! assert!(ops.contains("top"));
//! ```
//!
//! Handlers return `anyhow::Result<()>`. An [`ArgumentError`] or a
//! [`ValidationFailed`] inside the error means "this entry is unusable"
//! and the filter skips it; any other error is a backend failure and
//! propagates.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use sluice_notation::{Arg, Number};
use sluice_rules::ValidationFailed;
use thiserror::Error;

/// An argument list that cannot be used by an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("missing argument {index}")]
    Missing { index: usize },

    #[error("argument {index}: expected {expected}, got {found}")]
    Type {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument {index}: {reason}")]
    Invalid { index: usize, reason: String },

    /// Raised by [`sluice_rules::ensure`] inside a handler.
    #[error(transparent)]
    Failed(#[from] ValidationFailed),
}

/// Positional arguments passed to an operation.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Arg],
}

impl<'a> Args<'a> {
    /// Wraps a parsed argument list.
    pub fn new(values: &'a [Arg]) -> Self {
        Self { values }
    }

    /// Number of arguments supplied.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no argument was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All arguments, in order.
    pub fn as_slice(&self) -> &'a [Arg] {
        self.values
    }

    /// The raw argument at `index`.
    pub fn get(&self, index: usize) -> Result<&'a Arg, ArgumentError> {
        self.values
            .get(index)
            .ok_or(ArgumentError::Missing { index })
    }

    /// A string argument. Numbers are not converted.
    pub fn str(&self, index: usize) -> Result<&'a str, ArgumentError> {
        let arg = self.get(index)?;
        arg.as_str().ok_or(ArgumentError::Type {
            index,
            expected: "string",
            found: arg.type_name(),
        })
    }

    /// An integer argument; integer strings such as `"5"` are accepted.
    pub fn int(&self, index: usize) -> Result<i64, ArgumentError> {
        let arg = self.get(index)?;
        arg.to_integer().ok_or(ArgumentError::Type {
            index,
            expected: "integer",
            found: arg.type_name(),
        })
    }

    /// A numeric argument; numeric strings are accepted.
    pub fn number(&self, index: usize) -> Result<Number, ArgumentError> {
        let arg = self.get(index)?;
        arg.as_number().ok_or(ArgumentError::Type {
            index,
            expected: "number",
            found: arg.type_name(),
        })
    }

    /// Parses the argument's text with [`FromStr`].
    pub fn parse<T>(&self, index: usize) -> Result<T, ArgumentError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let arg = self.get(index)?;
        let text = match arg.as_str() {
            Some(s) => s.to_string(),
            None => arg.to_string(),
        };
        text.parse().map_err(|e: T::Err| ArgumentError::Invalid {
            index,
            reason: e.to_string(),
        })
    }
}

/// A query mutation invocable through a request parameter.
pub trait Operation<B>: Send + Sync {
    /// Number of positional arguments the operation takes.
    fn arity(&self) -> usize;

    /// Applies the operation to the backend.
    fn apply(&self, backend: &mut B, args: Args<'_>) -> anyhow::Result<()>;
}

/// Wraps a function or closure as an [`Operation`].
pub struct FnOperation<F> {
    arity: usize,
    f: F,
}

impl<F> FnOperation<F> {
    /// Wraps `f` as an operation taking `arity` arguments.
    pub fn new(arity: usize, f: F) -> Self {
        Self { arity, f }
    }
}

impl<B, F> Operation<B> for FnOperation<F>
where
    F: Fn(&mut B, Args<'_>) -> anyhow::Result<()> + Send + Sync,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn apply(&self, backend: &mut B, args: Args<'_>) -> anyhow::Result<()> {
        (self.f)(backend, args)
    }
}

/// Named operations available to a filter.
///
/// The catalog is built once and borrowed by every [`Filter`](crate::Filter),
/// so it can live as long as the application.
pub struct Operations<B> {
    entries: HashMap<String, Box<dyn Operation<B>>>,
}

impl<B> Default for Operations<B> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<B> Operations<B> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function taking exactly `arity` arguments.
    ///
    /// Registering a name twice replaces the earlier operation.
    pub fn operation<F>(self, name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&mut B, Args<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with(name, FnOperation::new(arity, f))
    }

    /// Registers any [`Operation`] implementation.
    pub fn with<O>(mut self, name: impl Into<String>, op: O) -> Self
    where
        O: Operation<B> + 'static,
    {
        self.insert(name, op);
        self
    }

    /// Registers an operation in place.
    pub fn insert<O>(&mut self, name: impl Into<String>, op: O)
    where
        O: Operation<B> + 'static,
    {
        self.entries.insert(name.into(), Box::new(op));
    }

    /// Looks up an operation by name.
    pub fn get(&self, name: &str) -> Option<&dyn Operation<B>> {
        self.entries.get(name).map(|op| op.as_ref())
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B> fmt::Debug for Operations<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Operations").field("names", &names).finish()
    }
}

/// Derives the operation name from a parameter key.
///
/// A trailing `_<digits>` suffix is stripped so one operation can be
/// submitted several times under distinct keys.
///
/// ```
/// use sluice_dispatch::operation_name;
///
/// assert_eq!(operation_name("where_2"), "where");
/// assert_eq!(operation_name("where"), "where");
/// assert_eq!(operation_name("where2"), "where2");
/// ```
pub fn operation_name(key: &str) -> &str {
    let stem = key.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == key.len() {
        return key;
    }
    stem.strip_suffix('_').unwrap_or(key)
}
