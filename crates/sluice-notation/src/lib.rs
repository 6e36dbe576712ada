//! Bracket-notation argument lists for flat request parameters.
//!
//! Query strings carry one string per key. This crate lets a single value
//! carry an ordered argument list:
//!
//! ```text
//! ?where=[age,>,18]&where_2=['name','LIKE','o\'b']&sort=[id,-1]&page=2
//! ```
//!
//! Values that are already structured (a JSON body, a test fixture) pass
//! through untouched, so callers can bypass the grammar entirely.
//!
//! # Example
//!
//! ```rust
//! use sluice_notation::{Arg, Notation, RawParameters};
//!
//! let raw = RawParameters::from_pairs([
//!     ("where", "[age,>,18]"),
//!     ("broken", "[age"),
//!     ("page", "2"),
//! ]);
//!
//! let parsed = Notation::new().parse_params(&raw);
//! assert_eq!(
//!     parsed.get("where"),
//!     Some(&[Arg::from("age"), Arg::from(">"), Arg::from("18")][..])
//! );
//! assert_eq!(parsed.first("page"), Some(&Arg::from("2")));
//! assert!(parsed.get("broken").is_none());
//! assert_eq!(parsed.rejected().next().map(|(key, _)| key), Some("broken"));
//! ```

mod error;
mod notation;
mod params;
mod value;

pub use error::{NotationError, Result};
pub use notation::{parse, render, Notation, Scalars};
pub use params::{ParsedParameters, RawParameters, RawValue};
pub use value::{Arg, Number};
