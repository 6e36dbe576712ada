//! Composable validation rules for request arguments.
//!
//! Every operation exposed through request parameters declares one
//! [`RuleSet`] per positional argument. An argument list is accepted only
//! when its length matches and every position passes:
//!
//! ```rust
//! use sluice_notation::Arg;
//! use sluice_rules::{check, Rule, RuleSet, Slot, Violation};
//!
//! let where_rules = vec![
//!     RuleSet::from(Rule::matches(r"^[a-zA-Z_]+$").unwrap()),
//!     RuleSet::all([Slot::any_of([
//!         Rule::one_of(["=", "!=", "<", ">", "<=", ">="]),
//!         Rule::one_of(["LIKE"]),
//!     ])]),
//!     RuleSet::from(Rule::any()),
//! ];
//!
//! let ok = [Arg::from("age"), Arg::from(">"), Arg::from("18")];
//! assert!(check(&ok, &where_rules).is_ok());
//!
//! let injected = [Arg::from("age; drop"), Arg::from(">"), Arg::from("18")];
//! assert!(matches!(
//!     check(&injected, &where_rules),
//!     Err(Violation::Rejected { position: 0, .. })
//! ));
//! ```
//!
//! # Rule Semantics
//!
//! | Rule | Passes when |
//! |------|-------------|
//! | `any` | always |
//! | `is_int` / `is_string` | the value has that runtime type |
//! | `is_numeric` | the value is a number or a numeric string |
//! | `contains(s)` | the value is a string containing `s` |
//! | `greater_than`, `at_least`, `less_than`, `at_most`, `within` | numeric comparison |
//! | `one_of` / `none_of` | strict typed equality with a member / with no member |
//! | `matches(re)` | the value is a string matching `re` |
//!
//! Rules never panic or error on unexpected types; they return `false`.

mod error;
mod rule;
mod ruleset;
mod validate;

pub use error::{Result, RuleError, ValidationFailed, Violation};
pub use rule::{Custom, FnPredicate, Pattern, Predicate, PredicateResult, Rule};
pub use ruleset::{RuleSet, Slot};
pub use validate::{check, ensure, ensure_or, validate};
