//! The storage seam.
//!
//! The filter core never talks to a database directly. It drives a value
//! implementing [`Backend`], which accumulates query state (conditions,
//! ordering, windowing) until rows are fetched. Backends are cloned to
//! compute metadata and fetch rows independently, so a clone must be a
//! full, independent copy of the accumulated query.
//!
//! [`Conditions`] is an optional extension for backends that can add
//! where-clauses; the standard `where`/`orWhere` operations require it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sluice_notation::{Arg, Number};

use crate::page::PageMeta;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Reads a numeric direction: negative means descending.
    pub fn from_sign(n: Number) -> Self {
        if n.to_f64() < 0.0 {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// `ASC` or `DESC`.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The four primitives the filter core requires from a storage backend.
///
/// Operation handlers registered by the integrator may call any other
/// methods the concrete type offers.
pub trait Backend: Clone {
    /// A fetched row.
    type Row;

    /// Appends an ordering on `column`.
    fn apply_order(&mut self, column: &str, dir: Dir) -> anyhow::Result<()>;

    /// Restricts the query to a window of rows.
    fn apply_limit_offset(&mut self, limit: u64, offset: u64) -> anyhow::Result<()>;

    /// Counts the rows matched by the accumulated query and builds page metadata.
    ///
    /// Called on a copy that has no limit/offset applied.
    fn total_and_meta(&mut self, per_page: u64, page: u64) -> anyhow::Result<PageMeta>;

    /// Executes the query and returns the rows in order.
    fn fetch_rows(&mut self) -> anyhow::Result<Vec<Self::Row>>;
}

/// Backends that accumulate AND/OR where-clauses.
///
/// Clauses fold left: each new clause combines with everything added
/// before it, the way chained `where`/`orWhere` calls on a query builder do.
pub trait Conditions: Backend {
    fn and_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()>;

    fn or_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()>;
}

/// Comparison operators accepted by the standard where operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    /// Substring match (`%value%`).
    Like,
}

impl Comparison {
    pub const ALL: [Comparison; 7] = [
        Comparison::Eq,
        Comparison::Ne,
        Comparison::Lt,
        Comparison::Gt,
        Comparison::Lte,
        Comparison::Gte,
        Comparison::Like,
    ];

    /// The operator as written in request parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Lt => "<",
            Comparison::Gt => ">",
            Comparison::Lte => "<=",
            Comparison::Gte => ">=",
            Comparison::Like => "LIKE",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown comparison operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator '{0}'")]
pub struct UnknownComparison(pub String);

impl FromStr for Comparison {
    type Err = UnknownComparison;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparison::ALL
            .into_iter()
            .find(|cmp| cmp.as_str() == s)
            .ok_or_else(|| UnknownComparison(s.to_string()))
    }
}
