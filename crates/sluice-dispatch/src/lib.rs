//! Allow-listed dispatch of request parameters to query operations.
//!
//! `sluice-dispatch` lets end users drive a query through flat request
//! parameters while the application decides which operations exist, which
//! arguments they accept, and how often each may run per request.
//!
//! # Features
//!
//! - **Operation catalog**: map names to typed handlers ([`Operations`])
//! - **Allow-list**: per-operation rule sets and call budgets ([`Filter::allow`])
//! - **Graceful degradation**: unusable parameters are skipped, never fatal
//! - **Pagination**: `{data, meta}` envelopes computed on independent copies
//! - **Diagnostics**: an [`Outcome`] per parameter via [`Filter::report`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use sluice_dispatch::{Filter, Operations};
//! use sluice_notation::RawParameters;
//! use sluice_rules::{Rule, RuleSet};
//!
//! let ops = Operations::standard();
//! let raw = RawParameters::from_query("where=[age,>,30]&where_2=[name,LIKE,a]&page=2");
//!
//! let page = Filter::new(users.query(), &ops, &raw)
//!     .allow(
//!         "where",
//!         vec![
//!             Rule::one_of(["age", "name"]).into(),
//!             Rule::one_of([">", "<", "LIKE"]).into(),
//!             Rule::any().into(),
//!         ],
//!         Some(2),
//!     )
//!     .paginate()?;
//! ```
//!
//! # Backends
//!
//! The core needs four primitives from storage, expressed by [`Backend`]:
//! ordering, windowing, counting, and fetching. Backends that accumulate
//! where-clauses also implement [`Conditions`], which the standard `where`
//! and `orWhere` operations use.

mod allow;
mod backend;
mod error;
mod filter;
mod operation;
mod page;
mod report;
mod settings;
mod standard;

pub use allow::OperationSpec;
pub use backend::{Backend, Comparison, Conditions, Dir, UnknownComparison};
pub use error::{Error, Result, Stage};
pub use filter::Filter;
pub use operation::{operation_name, ArgumentError, Args, FnOperation, Operation, Operations};
pub use page::{Page, PageMeta};
pub use report::{Outcome, SkipReason, Status};
pub use settings::Settings;
pub use standard::{and_where, or_where, sort};
