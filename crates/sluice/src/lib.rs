//! # Sluice - Request Parameters to Queries, Safely
//!
//! Sluice lets end users shape a query (filters, sorting, pagination)
//! through flat request parameters, while the application stays in charge
//! of what can run:
//!
//! - only declared operations are called;
//! - every argument is validated before it reaches storage;
//! - each operation runs at most a bounded number of times per request.
//!
//! Invalid parameters are skipped rather than failing the request, so a
//! client sending one bad filter still gets the results of the good ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sluice::{Filter, MemoryTable, Operations, RawParameters, Rule, RuleSet};
//!
//! let users = MemoryTable::new(vec![
//!     json!({"id": 1, "name": "John", "age": 25}),
//!     json!({"id": 2, "name": "Alice", "age": 30}),
//!     json!({"id": 3, "name": "Emily", "age": 35}),
//! ]);
//! let ops = Operations::standard();
//!
//! let raw = RawParameters::from_query(
//!     "where=[age,>=,30]&where_2=[age,<,99]&where_3=[id,>,0]&perPage=1",
//! );
//! let mut filter = Filter::new(users.query(), &ops, &raw).allow(
//!     "where",
//!     vec![
//!         Rule::one_of(["age", "name"]).into(),
//!         Rule::one_of([">", ">=", "<", "<="]).into(),
//!         RuleSet::from(Rule::is_numeric()),
//!     ],
//!     Some(2),
//! );
//!
//! let page = filter.paginate()?;
//! assert_eq!(page.data, vec![json!({"id": 2, "name": "Alice", "age": 30})]);
//! assert_eq!(page.meta.total, 2);
//! assert_eq!(page.meta.last_page, 2);
//! # Ok::<(), sluice::Error>(())
//! ```
//!
//! ## Crates
//!
//! | crate | provides |
//! |-------|----------|
//! | `sluice-notation` | the `[a,'b',c]` argument grammar and parameter maps |
//! | `sluice-rules` | composable validation rules |
//! | `sluice-dispatch` | the filter core, operation catalog, pagination |
//! | `sluice-memory` | an in-memory backend |
//!
//! This crate re-exports all of them and adds [`Config`], a YAML format for
//! settings and allow-lists.
//!
//! ## Bracket Notation
//!
//! A parameter value wrapped in brackets is a comma-separated list.
//! Single quotes protect commas, and a backslash inside quotes escapes the
//! next character:
//!
//! ```rust
//! use sluice::{parse, Arg};
//!
//! assert_eq!(
//!     parse(r"[name,LIKE,'O\'Brien, P']").unwrap(),
//!     vec![Arg::from("name"), Arg::from("LIKE"), Arg::from("O'Brien, P")]
//! );
//! assert_eq!(parse("plain").unwrap(), vec![Arg::from("plain")]);
//! assert!(parse("[open").is_err());
//! ```

mod config;

pub use config::{Config, ConfigError};

pub use sluice_notation::{
    parse, render, Arg, Notation, NotationError, Number, ParsedParameters, RawParameters,
    RawValue, Scalars,
};

pub use sluice_rules::{
    check, ensure, ensure_or, validate, Custom, FnPredicate, Pattern, Predicate, PredicateResult,
    Rule, RuleError, RuleSet, Slot, ValidationFailed, Violation,
};

pub use sluice_dispatch::{
    and_where, operation_name, or_where, sort, ArgumentError, Args, Backend, Comparison,
    Conditions, Dir, Error, FnOperation, Filter, Operation, OperationSpec, Operations, Outcome,
    Page, PageMeta, Settings, SkipReason, Stage, Status, UnknownComparison,
};

pub use sluice_memory::{Clauses, Condition, MemoryQuery, MemoryTable, Record, Value};
