//! Declared operations and their per-request call budgets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sluice_notation::Arg;
use sluice_rules::{check, RuleSet, Violation};

/// A declaration that an operation may be called, with one rule set per
/// positional argument.
///
/// This is the deserializable form used by configuration files; a
/// missing `max_calls` falls back to the filter's configured default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSpec {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calls: Option<u32>,
}

impl OperationSpec {
    /// Declares `name` with one rule set per argument and the default budget.
    pub fn new(name: impl Into<String>, rules: Vec<RuleSet>) -> Self {
        Self {
            name: name.into(),
            rules,
            max_calls: None,
        }
    }

    /// Sets the per-request budget.
    pub fn max_calls(mut self, max_calls: u32) -> Self {
        self.max_calls = Some(max_calls);
        self
    }
}

/// Why an allow-list rejected a call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Denied {
    NotAllowed,
    BudgetExhausted,
    Rejected(Violation),
}

#[derive(Debug, Clone)]
struct Allowance {
    rules: Vec<RuleSet>,
    remaining: u32,
}

/// Registered operations with their remaining call counts.
#[derive(Debug, Clone, Default)]
pub(crate) struct AllowList {
    entries: IndexMap<String, Allowance>,
}

impl AllowList {
    /// Registers (or re-registers, resetting the budget) an operation.
    pub(crate) fn allow(&mut self, name: String, rules: Vec<RuleSet>, max_calls: u32) {
        self.entries.insert(
            name,
            Allowance {
                rules,
                remaining: max_calls,
            },
        );
    }

    pub(crate) fn admit(&self, name: &str, args: &[Arg]) -> Result<(), Denied> {
        let allowance = self.entries.get(name).ok_or(Denied::NotAllowed)?;
        if allowance.remaining == 0 {
            return Err(Denied::BudgetExhausted);
        }
        check(args, &allowance.rules).map_err(Denied::Rejected)
    }

    /// Records one successful call.
    pub(crate) fn consume(&mut self, name: &str) -> Option<u32> {
        let allowance = self.entries.get_mut(name)?;
        allowance.remaining = allowance.remaining.saturating_sub(1);
        Some(allowance.remaining)
    }

    pub(crate) fn remaining(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|a| a.remaining)
    }
}
