//! Primitive argument values.
//!
//! Every parsed request parameter becomes an ordered list of [`Arg`]s. An
//! `Arg` is strictly typed: `Arg::Int(1)`, `Arg::Float(1.0)` and
//! `Arg::Str("1")` are three different values and never compare equal.
//! Numeric interpretation of strings is opt-in through [`Arg::as_number`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single primitive argument.
///
/// Structured parameter sources (JSON bodies, YAML fixtures) deserialize
/// straight into this type; bracket notation yields `Str` values unless
/// scalar inference is switched on.
///
/// # Example
///
/// ```
/// use sluice_notation::{Arg, Number};
///
/// let age = Arg::from("18");
/// assert!(age.is_string());
/// assert!(age.is_numeric());
/// assert_eq!(age.as_number(), Some(Number::I64(18)));
/// assert_ne!(age, Arg::Int(18));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text, taken verbatim from the request.
    Str(String),
}

impl Arg {
    /// Reads an unquoted token as the narrowest scalar it spells.
    ///
    /// `true`/`false` become booleans, integers become `Int`, other
    /// finite decimal numbers become `Float`. Everything else stays text.
    pub fn infer(token: String) -> Self {
        match token.as_str() {
            "true" => return Arg::Bool(true),
            "false" => return Arg::Bool(false),
            _ => {}
        }
        match parse_number(&token) {
            Some(Number::I64(n)) if token == token.trim() => Arg::Int(n),
            Some(Number::F64(n)) if token == token.trim() => Arg::Float(n),
            _ => Arg::Str(token),
        }
    }

    /// Returns `true` if this is an `Int` value.
    pub fn is_int(&self) -> bool {
        matches!(self, Arg::Int(_))
    }

    /// Returns `true` if this is a `Float` value.
    pub fn is_float(&self) -> bool {
        matches!(self, Arg::Float(_))
    }

    /// Returns `true` if this is a `Str` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Arg::Str(_))
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Arg::Bool(_))
    }

    /// Returns `true` for numbers and for strings that spell a number.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the integer value, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// Numbers map directly; strings are read as numbers when the whole
    /// (whitespace-trimmed) string is a decimal literal. Booleans are not
    /// numeric.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Arg::Int(n) => Some(Number::I64(*n)),
            Arg::Float(n) => Some(Number::F64(*n)),
            Arg::Str(s) => parse_number(s),
            Arg::Bool(_) => None,
        }
    }

    /// Integer view of the value, accepting integer strings such as `"5"`.
    pub fn to_integer(&self) -> Option<i64> {
        match self.as_number()? {
            Number::I64(n) => Some(n),
            Number::F64(_) => None,
        }
    }

    /// Returns the type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Bool(_) => "bool",
            Arg::Int(_) => "int",
            Arg::Float(_) => "float",
            Arg::Str(_) => "string",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Float(n) => write!(f, "{n}"),
            Arg::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Int(n as i64)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Arg::Int(n as i64)
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Float(n)
    }
}

/// Numeric value used for threshold comparisons.
///
/// Integers keep full precision; mixed comparisons go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

/// Reads a decimal literal, rejecting `inf`, `nan` and friends.
fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(Number::I64(n));
    }
    let literal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !literal || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().map(Number::F64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_equality_across_types() {
        assert_ne!(Arg::Int(1), Arg::Str("1".into()));
        assert_ne!(Arg::Int(1), Arg::Float(1.0));
        assert_eq!(Arg::from("a"), Arg::Str("a".into()));
    }

    #[test]
    fn numeric_strings() {
        assert_eq!(Arg::from("42").as_number(), Some(Number::I64(42)));
        assert_eq!(Arg::from(" -3 ").as_number(), Some(Number::I64(-3)));
        assert_eq!(Arg::from("5.6").as_number(), Some(Number::F64(5.6)));
        assert_eq!(Arg::from("1e3").as_number(), Some(Number::F64(1000.0)));
        assert_eq!(Arg::from("inf").as_number(), None);
        assert_eq!(Arg::from("NaN").as_number(), None);
        assert_eq!(Arg::from("12abc").as_number(), None);
        assert_eq!(Arg::from("").as_number(), None);
        assert_eq!(Arg::from(".").as_number(), None);
        assert_eq!(Arg::Bool(true).as_number(), None);
    }

    #[test]
    fn integer_view() {
        assert_eq!(Arg::Int(7).to_integer(), Some(7));
        assert_eq!(Arg::from("7").to_integer(), Some(7));
        assert_eq!(Arg::from("7.5").to_integer(), None);
        assert_eq!(Arg::Float(7.0).to_integer(), None);
    }

    #[test]
    fn infer_scalars() {
        assert_eq!(Arg::infer("true".into()), Arg::Bool(true));
        assert_eq!(Arg::infer("-1".into()), Arg::Int(-1));
        assert_eq!(Arg::infer("2.5".into()), Arg::Float(2.5));
        assert_eq!(Arg::infer("age".into()), Arg::Str("age".into()));
        assert_eq!(Arg::infer(" 1".into()), Arg::Str(" 1".into()));
        assert_eq!(Arg::infer("".into()), Arg::Str(String::new()));
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::I64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::I64(1)), None);
    }

    #[test]
    fn deserializes_untagged() {
        let args: Vec<Arg> = serde_json::from_str(r#"["age", 18, 5.5, true]"#).unwrap();
        assert_eq!(
            args,
            vec![
                Arg::from("age"),
                Arg::Int(18),
                Arg::Float(5.5),
                Arg::Bool(true)
            ]
        );
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(Arg::from("new york").to_string(), "new york");
        assert_eq!(Arg::Int(-2).to_string(), "-2");
        assert_eq!(Arg::Bool(false).to_string(), "false");
    }
}
