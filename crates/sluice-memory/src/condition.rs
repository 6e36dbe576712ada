//! Where-clauses and their evaluation against records.
//!
//! Clauses are kept the way a SQL `WHERE` reads them: each `or` starts a
//! new group and each `and` joins the current one, so AND binds tighter
//! than OR. `a OR b AND c` matches rows where `a` holds, or where both `b`
//! and `c` hold.

use std::borrow::Cow;
use std::cmp::Ordering;

use sluice_dispatch::Comparison;
use sluice_notation::Arg;

use crate::record::Record;
use crate::value::Value;

/// One `column <cmp> value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub cmp: Comparison,
    pub value: Arg,
}

impl Condition {
    pub fn new(column: impl Into<String>, cmp: Comparison, value: impl Into<Arg>) -> Self {
        Self {
            column: column.into(),
            cmp,
            value: value.into(),
        }
    }

    /// Tests a field value.
    ///
    /// Numbers compare numerically against numeric arguments (including
    /// numeric strings). Strings compare as text unless both sides read as
    /// numbers. `LIKE` is a case-insensitive substring match on the text of
    /// either. Booleans support only `=` and `!=`. Missing fields and
    /// incomparable pairs never match.
    pub fn matches(&self, field: &Value<'_>) -> bool {
        if self.cmp == Comparison::Like {
            return match field.text() {
                Some(text) => like(&text, &arg_text(&self.value)),
                None => false,
            };
        }

        match field {
            Value::None => false,
            Value::Number(n) => self
                .value
                .as_number()
                .and_then(|v| n.compare(v))
                .is_some_and(|ord| holds(self.cmp, ord)),
            Value::String(s) => {
                let text = arg_text(&self.value);
                let ordering = Arg::from(*s)
                    .as_number()
                    .zip(self.value.as_number())
                    .and_then(|(a, b)| a.compare(b))
                    .unwrap_or_else(|| Ord::cmp(*s, &*text));
                holds(self.cmp, ordering)
            }
            Value::Bool(b) => match (arg_bool(&self.value), self.cmp) {
                (Some(v), Comparison::Eq) => *b == v,
                (Some(v), Comparison::Ne) => *b != v,
                _ => false,
            },
        }
    }
}

/// Accumulated where-clauses in OR-of-AND form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    groups: Vec<Vec<Condition>>,
}

impl Clauses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins a condition to the current group.
    pub fn and(&mut self, condition: Condition) {
        match self.groups.last_mut() {
            Some(group) => group.push(condition),
            None => self.groups.push(vec![condition]),
        }
    }

    /// Starts a new alternative group.
    pub fn or(&mut self, condition: Condition) {
        self.groups.push(vec![condition]);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Vec<Condition>] {
        &self.groups
    }

    /// An empty clause list matches every row.
    pub fn matches<R: Record + ?Sized>(&self, row: &R) -> bool {
        self.groups.is_empty()
            || self.groups.iter().any(|group| {
                group
                    .iter()
                    .all(|condition| condition.matches(&row.field(&condition.column)))
            })
    }
}

fn holds(cmp: Comparison, ordering: Ordering) -> bool {
    match cmp {
        Comparison::Eq => ordering == Ordering::Equal,
        Comparison::Ne => ordering != Ordering::Equal,
        Comparison::Lt => ordering == Ordering::Less,
        Comparison::Gt => ordering == Ordering::Greater,
        Comparison::Lte => ordering != Ordering::Greater,
        Comparison::Gte => ordering != Ordering::Less,
        Comparison::Like => false,
    }
}

fn like(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn arg_text(arg: &Arg) -> Cow<'_, str> {
    match arg.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(arg.to_string()),
    }
}

fn arg_bool(arg: &Arg) -> Option<bool> {
    match arg {
        Arg::Bool(b) => Some(*b),
        Arg::Int(0) => Some(false),
        Arg::Int(1) => Some(true),
        Arg::Str(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sluice_notation::Number;

    fn num(n: i64) -> Value<'static> {
        Value::Number(Number::I64(n))
    }

    #[test]
    fn numeric_comparisons_accept_numeric_strings() {
        let gt = Condition::new("age", Comparison::Gt, "28");
        assert!(gt.matches(&num(30)));
        assert!(!gt.matches(&num(28)));

        let lte = Condition::new("age", Comparison::Lte, 27);
        assert!(lte.matches(&num(27)));
        assert!(!lte.matches(&num(28)));

        let bad = Condition::new("age", Comparison::Eq, "old");
        assert!(!bad.matches(&num(30)));
        assert!(!Condition::new("age", Comparison::Ne, "old").matches(&num(30)));
    }

    #[test]
    fn string_comparisons() {
        let eq = Condition::new("name", Comparison::Eq, "Emily");
        assert!(eq.matches(&Value::String("Emily")));
        assert!(!eq.matches(&Value::String("emily")));

        let ne = Condition::new("name", Comparison::Ne, "Emily");
        assert!(ne.matches(&Value::String("Mia")));

        // numeric text compares as numbers, not lexicographically
        let gt = Condition::new("code", Comparison::Gt, 9);
        assert!(gt.matches(&Value::String("10")));
    }

    #[test]
    fn like_is_case_insensitive_substring() {
        let like = Condition::new("name", Comparison::Like, "i");
        assert!(like.matches(&Value::String("Olivia")));
        assert!(like.matches(&Value::String("IAN")));
        assert!(!like.matches(&Value::String("John")));
        assert!(Condition::new("age", Comparison::Like, 2).matches(&num(25)));
        assert!(!like.matches(&Value::None));
    }

    #[test]
    fn booleans_support_equality_only() {
        let active = Condition::new("isActive", Comparison::Eq, "true");
        assert!(active.matches(&Value::Bool(true)));
        assert!(!active.matches(&Value::Bool(false)));
        assert!(Condition::new("isActive", Comparison::Ne, 1).matches(&Value::Bool(false)));
        assert!(!Condition::new("isActive", Comparison::Gt, false).matches(&Value::Bool(true)));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let mut clauses = Clauses::new();
        clauses.and(Condition::new("age", Comparison::Lt, 25));
        clauses.or(Condition::new("name", Comparison::Eq, "Alice"));
        clauses.and(Condition::new("active", Comparison::Eq, true));
        assert_eq!(clauses.groups().len(), 2);

        let young = json!({"age": 22, "name": "Daniel", "active": false});
        let alice_inactive = json!({"age": 30, "name": "Alice", "active": false});
        let alice_active = json!({"age": 30, "name": "Alice", "active": true});

        assert!(clauses.matches(&young));
        assert!(!clauses.matches(&alice_inactive));
        assert!(clauses.matches(&alice_active));
    }

    #[test]
    fn leading_or_behaves_like_and() {
        let mut clauses = Clauses::new();
        clauses.or(Condition::new("age", Comparison::Gt, 1));
        assert!(clauses.matches(&json!({"age": 2})));
        assert!(!clauses.matches(&json!({"age": 0})));
        assert!(Clauses::new().matches(&json!({})));
    }
}
