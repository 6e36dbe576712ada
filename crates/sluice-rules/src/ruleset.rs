//! AND/OR composition of rules for one argument position.
//!
//! Composition is fixed at two levels:
//!
//! ```text
//! RuleSet::Single(rule)          passes iff rule passes
//! RuleSet::All([slot, ...])      passes iff every slot passes
//! Slot::Rule(rule)               passes iff rule passes
//! Slot::AnyOf([rule, ...])       passes iff at least one rule passes
//! ```
//!
//! An empty `All` passes vacuously; an empty `AnyOf` never passes.

use serde::{Deserialize, Serialize};
use sluice_notation::Arg;

use crate::rule::Rule;

/// One AND-operand of a [`RuleSet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    /// A single rule.
    Rule(Rule),
    /// Alternatives: at least one must pass.
    AnyOf(Vec<Rule>),
}

impl Slot {
    /// Builds an OR-group.
    pub fn any_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        Slot::AnyOf(rules.into_iter().collect())
    }

    /// Tests a value against this slot.
    pub fn passes(&self, value: &Arg) -> bool {
        match self {
            Slot::Rule(rule) => rule.check(value),
            Slot::AnyOf(rules) => rules.iter().any(|rule| rule.check(value)),
        }
    }
}

impl From<Rule> for Slot {
    fn from(rule: Rule) -> Self {
        Slot::Rule(rule)
    }
}

/// The validation contract for one positional argument.
///
/// # Example
///
/// ```
/// use sluice_notation::Arg;
/// use sluice_rules::{Rule, RuleSet, Slot};
///
/// // an integer or a numeric string, and at most 100
/// let set = RuleSet::all([
///     Slot::any_of([Rule::is_int(), Rule::is_numeric()]),
///     Rule::at_most(100).into(),
/// ]);
///
/// assert!(set.passes(&Arg::Int(20)));
/// assert!(set.passes(&Arg::from("20")));
/// assert!(!set.passes(&Arg::from("200")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSet {
    /// Exactly one rule.
    Single(Rule),
    /// All slots must pass.
    All(Vec<Slot>),
}

impl RuleSet {
    /// Builds an AND-group.
    pub fn all(slots: impl IntoIterator<Item = Slot>) -> Self {
        RuleSet::All(slots.into_iter().collect())
    }

    /// Tests a value against this rule set.
    pub fn passes(&self, value: &Arg) -> bool {
        match self {
            RuleSet::Single(rule) => rule.check(value),
            RuleSet::All(slots) => slots.iter().all(|slot| slot.passes(value)),
        }
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        RuleSet::Single(rule)
    }
}

impl From<Vec<Slot>> for RuleSet {
    fn from(slots: Vec<Slot>) -> Self {
        RuleSet::All(slots)
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        RuleSet::All(rules.into_iter().map(Slot::Rule).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rule() {
        let set = RuleSet::from(Rule::greater_than(800));
        assert!(set.passes(&Arg::Int(900)));
        assert!(!set.passes(&Arg::Int(500)));
    }

    #[test]
    fn all_slots_must_pass() {
        let set = RuleSet::from(vec![Rule::greater_than(7), Rule::less_than(100)]);
        assert!(set.passes(&Arg::Int(11)));
        assert!(!set.passes(&Arg::Int(5)));
        assert!(!set.passes(&Arg::Int(150)));
    }

    #[test]
    fn any_of_is_an_or_group() {
        let set = RuleSet::all([
            Slot::any_of([Rule::one_of([">", "<"]), Rule::one_of(["=", "!="])]),
            Rule::is_string().into(),
        ]);
        assert!(set.passes(&Arg::from(">")));
        assert!(set.passes(&Arg::from("!=")));
        assert!(!set.passes(&Arg::from("LIKE")));
    }

    #[test]
    fn empty_groups() {
        assert!(RuleSet::all([]).passes(&Arg::Int(1)));
        assert!(!RuleSet::all([Slot::any_of([])]).passes(&Arg::Int(1)));
    }

    #[test]
    fn deserializes_nested_lists() {
        let yaml = r#"
- is_string
- [ { in: [">", "<"] }, { in: ["="] } ]
"#;
        let set: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert!(set.passes(&Arg::from("=")));
        assert!(set.passes(&Arg::from("<")));
        assert!(!set.passes(&Arg::from("~")));

        let single: RuleSet = serde_yaml::from_str("is_int").unwrap();
        assert!(matches!(single, RuleSet::Single(Rule::IsInt)));
    }
}
