use crate::value::Value;

/// Rows that can be filtered and sorted by column name.
///
/// # Example
///
/// ```
/// use sluice_memory::{Record, Value};
/// use sluice_notation::Number;
///
/// struct User {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for User {
///     fn field(&self, column: &str) -> Value<'_> {
///         match column {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(Number::I64(self.age.into())),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a column, or [`Value::None`] for unknown columns.
    fn field(&self, column: &str) -> Value<'_>;
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, column: &str) -> Value<'_> {
        self.get(column).map(Value::from_json).unwrap_or(Value::None)
    }
}

/// Objects expose their keys; every other JSON value has no columns.
impl Record for serde_json::Value {
    fn field(&self, column: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(column),
            _ => Value::None,
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, column: &str) -> Value<'_> {
        (**self).field(column)
    }
}
