//! Field values read from records.

use std::cmp::Ordering;

use sluice_notation::Number;

/// A field value borrowed from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    Bool(bool),
    /// Field absent, null, or not comparable.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads a JSON value. Arrays and objects are not comparable.
    pub fn from_json(json: &'a serde_json::Value) -> Self {
        match json {
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Number(Number::I64(i)),
                None => n
                    .as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None),
            },
            _ => Value::None,
        }
    }

    /// The value's text, as a string comparison would see it.
    pub(crate) fn text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some((*s).to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::None => None,
        }
    }
}

/// Orders two values of the same kind.
///
/// Missing values sort after everything else; mismatched kinds and NaN
/// are incomparable.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}
