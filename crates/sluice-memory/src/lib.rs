//! An in-memory [`Backend`](sluice_dispatch::Backend) for sluice filters.
//!
//! Rows live in a [`MemoryTable`]; each request takes a [`MemoryQuery`] from
//! it, which accumulates where-clauses, orderings, and a limit/offset
//! window the way a SQL query builder would. Rows only need to implement
//! [`Record`], which exposes fields by column name. JSON objects implement
//! it out of the box.
//!
//! ```rust
//! use serde_json::json;
//! use sluice_dispatch::{Filter, Operations};
//! use sluice_memory::MemoryTable;
//! use sluice_notation::RawParameters;
//!
//! let users = MemoryTable::new(vec![
//!     json!({"id": 1, "name": "John", "age": 25}),
//!     json!({"id": 2, "name": "Alice", "age": 30}),
//!     json!({"id": 3, "name": "Michael", "age": 28}),
//! ]);
//!
//! let ops = Operations::standard();
//! let raw = RawParameters::from_query("where=[age,>,26]&sort=[age,-1]");
//! let page = Filter::new(users.query(), &ops, &raw).paginate()?;
//!
//! let names: Vec<_> = page.data.iter().map(|u| u["name"].clone()).collect();
//! assert_eq!(names, vec![json!("Alice"), json!("Michael")]);
//! # Ok::<(), sluice_dispatch::Error>(())
//! ```
//!
//! # Comparison semantics
//!
//! | field | argument | behavior |
//! |-------|----------|----------|
//! | number | number or numeric string | numeric comparison |
//! | string | anything | text comparison, numeric if both sides are numbers |
//! | bool | `true`/`false`/`1`/`0` | `=` and `!=` only |
//! | any | `LIKE` | case-insensitive substring of the text |
//! | missing | anything | never matches |

mod condition;
mod query;
mod record;
mod value;

pub use condition::{Clauses, Condition};
pub use query::{MemoryQuery, MemoryTable};
pub use record::Record;
pub use value::{compare_values, Value};
