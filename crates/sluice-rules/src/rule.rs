//! Single-value predicates.
//!
//! A [`Rule`] is a named, pure test over one [`Arg`]. Built-in rules never
//! fail on an unexpected runtime type: a string checked against
//! `greater_than(5)` simply does not pass. User-defined checks plug in
//! through the [`Predicate`] trait; a predicate that returns an error is
//! treated exactly like one that returns `false`.

use std::cmp::Ordering;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sluice_notation::{Arg, Number};

use crate::error::Result;

/// Result returned by user-defined predicates.
pub type PredicateResult = std::result::Result<bool, Box<dyn StdError + Send + Sync>>;

/// A named, user-defined check over a single value.
///
/// # Example
///
/// ```
/// use sluice_notation::Arg;
/// use sluice_rules::{Predicate, PredicateResult, Rule};
///
/// struct Even;
///
/// impl Predicate for Even {
///     fn name(&self) -> &str {
///         "even"
///     }
///
///     fn evaluate(&self, value: &Arg) -> PredicateResult {
///         let n = value.to_integer().ok_or("not an integer")?;
///         Ok(n % 2 == 0)
///     }
/// }
///
/// let rule = Rule::predicate(Even);
/// assert!(rule.check(&Arg::Int(4)));
/// assert!(!rule.check(&Arg::Int(3)));
/// assert!(!rule.check(&Arg::from("four"))); // error counts as failure
/// ```
pub trait Predicate: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Tests the value.
    fn evaluate(&self, value: &Arg) -> PredicateResult;
}

/// A [`Predicate`] built from a closure.
pub struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Arg) -> PredicateResult + Send + Sync,
{
    /// Wraps a closure under the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Arg) -> PredicateResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, value: &Arg) -> PredicateResult {
        (self.f)(value)
    }
}

/// Shared handle to a user-defined predicate.
#[derive(Clone)]
pub struct Custom(Arc<dyn Predicate>);

impl Custom {
    /// Returns the predicate's name.
    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Custom").field(&self.0.name()).finish()
    }
}

/// A compiled regular expression that serializes as its source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Pattern(Regex::new(source)?))
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(source: String) -> std::result::Result<Self, Self::Error> {
        Regex::new(&source).map(Pattern)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.0.as_str().to_string()
    }
}

/// A predicate over a single argument value.
///
/// Rules serialize in snake case, so allow-lists can live in config files:
///
/// ```yaml
/// - is_string
/// - in: [">", "<"]
/// - within: { min: 1, max: 99 }
/// - matches: "^[a-z_]+$"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Accepts every value.
    Any,
    /// Value is an `Int`.
    IsInt,
    /// Value is a `Str`.
    IsString,
    /// Value is a number or a numeric string.
    IsNumeric,
    /// Value is a string containing the needle.
    Contains(String),
    /// Numeric value strictly greater than the threshold.
    GreaterThan(Number),
    /// Numeric value greater than or equal to the threshold.
    AtLeast(Number),
    /// Numeric value strictly less than the threshold.
    LessThan(Number),
    /// Numeric value less than or equal to the threshold.
    AtMost(Number),
    /// Numeric value in the closed range `[min, max]`.
    Within { min: Number, max: Number },
    /// Value is strictly equal to one of the members.
    In(Vec<Arg>),
    /// Value is strictly equal to none of the members.
    NotIn(Vec<Arg>),
    /// Value is a string matching the pattern.
    Matches(Pattern),
    /// User-defined predicate.
    #[serde(skip)]
    Custom(Custom),
}

impl Rule {
    /// Accepts every value.
    pub fn any() -> Self {
        Rule::Any
    }

    /// Accepts `Int` values only.
    pub fn is_int() -> Self {
        Rule::IsInt
    }

    /// Accepts `Str` values only.
    pub fn is_string() -> Self {
        Rule::IsString
    }

    /// Accepts numbers and numeric strings.
    pub fn is_numeric() -> Self {
        Rule::IsNumeric
    }

    /// Accepts strings that contain `needle`.
    pub fn contains(needle: impl Into<String>) -> Self {
        Rule::Contains(needle.into())
    }

    /// Accepts numeric values `> threshold`.
    pub fn greater_than(threshold: impl Into<Number>) -> Self {
        Rule::GreaterThan(threshold.into())
    }

    /// Accepts numeric values `>= threshold`.
    pub fn at_least(threshold: impl Into<Number>) -> Self {
        Rule::AtLeast(threshold.into())
    }

    /// Accepts numeric values `< threshold`.
    pub fn less_than(threshold: impl Into<Number>) -> Self {
        Rule::LessThan(threshold.into())
    }

    /// Accepts numeric values `<= threshold`.
    pub fn at_most(threshold: impl Into<Number>) -> Self {
        Rule::AtMost(threshold.into())
    }

    /// Accepts numeric values within `[min, max]`.
    pub fn within(min: impl Into<Number>, max: impl Into<Number>) -> Self {
        Rule::Within {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Accepts values strictly equal to one of `members`.
    pub fn one_of<I, A>(members: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        Rule::In(members.into_iter().map(Into::into).collect())
    }

    /// Accepts values strictly equal to none of `members`.
    pub fn none_of<I, A>(members: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        Rule::NotIn(members.into_iter().map(Into::into).collect())
    }

    /// Accepts strings matching the regular expression.
    pub fn matches(pattern: &str) -> Result<Self> {
        Ok(Rule::Matches(Pattern::new(pattern)?))
    }

    /// Wraps a closure as a named rule.
    pub fn custom<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Arg) -> PredicateResult + Send + Sync + 'static,
    {
        Rule::predicate(FnPredicate::new(name, f))
    }

    /// Wraps a [`Predicate`] implementation.
    pub fn predicate(predicate: impl Predicate + 'static) -> Self {
        Rule::Custom(Custom(Arc::new(predicate)))
    }

    /// Tests a value against this rule.
    pub fn check(&self, value: &Arg) -> bool {
        match self {
            Rule::Any => true,
            Rule::IsInt => value.is_int(),
            Rule::IsString => value.is_string(),
            Rule::IsNumeric => value.is_numeric(),
            Rule::Contains(needle) => value.as_str().is_some_and(|s| s.contains(needle.as_str())),
            Rule::GreaterThan(t) => compare(value, *t, |o| o == Ordering::Greater),
            Rule::AtLeast(t) => compare(value, *t, |o| o != Ordering::Less),
            Rule::LessThan(t) => compare(value, *t, |o| o == Ordering::Less),
            Rule::AtMost(t) => compare(value, *t, |o| o != Ordering::Greater),
            Rule::Within { min, max } => {
                compare(value, *min, |o| o != Ordering::Less)
                    && compare(value, *max, |o| o != Ordering::Greater)
            }
            Rule::In(members) => members.contains(value),
            Rule::NotIn(members) => !members.contains(value),
            Rule::Matches(pattern) => value.as_str().is_some_and(|s| pattern.is_match(s)),
            Rule::Custom(custom) => match custom.0.evaluate(value) {
                Ok(passed) => passed,
                Err(error) => {
                    tracing::trace!(rule = custom.name(), %error, "predicate failed");
                    false
                }
            },
        }
    }
}

fn compare(value: &Arg, threshold: Number, accept: impl Fn(Ordering) -> bool) -> bool {
    value
        .as_number()
        .and_then(|n| n.compare(threshold))
        .is_some_and(accept)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Any => f.write_str("any"),
            Rule::IsInt => f.write_str("is_int"),
            Rule::IsString => f.write_str("is_string"),
            Rule::IsNumeric => f.write_str("is_numeric"),
            Rule::Contains(needle) => write!(f, "contains({needle:?})"),
            Rule::GreaterThan(t) => write!(f, "> {t}"),
            Rule::AtLeast(t) => write!(f, ">= {t}"),
            Rule::LessThan(t) => write!(f, "< {t}"),
            Rule::AtMost(t) => write!(f, "<= {t}"),
            Rule::Within { min, max } => write!(f, "within({min}, {max})"),
            Rule::In(members) => write!(f, "in({} values)", members.len()),
            Rule::NotIn(members) => write!(f, "not_in({} values)", members.len()),
            Rule::Matches(pattern) => write!(f, "matches({:?})", pattern.as_str()),
            Rule::Custom(custom) => f.write_str(custom.name()),
        }
    }
}
