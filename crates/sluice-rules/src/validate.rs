//! Argument-list validation and single-value assertion.

use sluice_notation::Arg;

use crate::error::{ValidationFailed, Violation};
use crate::ruleset::RuleSet;

/// Checks a positional argument list against a parallel list of rule sets.
///
/// The lengths must match exactly. Positions are checked in order and the
/// first failure is reported.
pub fn check(values: &[Arg], rule_sets: &[RuleSet]) -> Result<(), Violation> {
    if values.len() != rule_sets.len() {
        return Err(Violation::ArityMismatch {
            expected: rule_sets.len(),
            actual: values.len(),
        });
    }

    for (position, (value, rule_set)) in values.iter().zip(rule_sets).enumerate() {
        if !rule_set.passes(value) {
            return Err(Violation::Rejected {
                position,
                value: value.clone(),
            });
        }
    }

    Ok(())
}

/// Returns `true` if every argument passes its rule set and the arity matches.
///
/// # Example
///
/// ```
/// use sluice_notation::Arg;
/// use sluice_rules::{validate, Rule, RuleSet};
///
/// let rules = [
///     RuleSet::from(Rule::is_string()),
///     RuleSet::from(Rule::one_of([">", "<"])),
///     RuleSet::from(Rule::is_int()),
/// ];
///
/// let args = [Arg::from("age"), Arg::from(">"), Arg::Int(18)];
/// assert!(validate(&args, &rules));
/// assert!(!validate(&args[..2], &rules));
/// ```
pub fn validate(values: &[Arg], rule_sets: &[RuleSet]) -> bool {
    check(values, rule_sets).is_ok()
}

/// Returns `value` unchanged if it passes, otherwise the default.
///
/// The default is used whenever it is present, including "empty-looking"
/// defaults such as `Arg::Int(0)` or an empty string. Without a default a
/// failing value is reported as [`ValidationFailed`].
pub fn ensure(
    value: Arg,
    rule_set: &RuleSet,
    default: Option<Arg>,
) -> Result<Arg, ValidationFailed> {
    if rule_set.passes(&value) {
        return Ok(value);
    }
    default.ok_or(ValidationFailed { value })
}

/// Like [`ensure`] with a mandatory default.
pub fn ensure_or(value: Arg, rule_set: &RuleSet, default: impl Into<Arg>) -> Arg {
    if rule_set.passes(&value) {
        value
    } else {
        default.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::ruleset::Slot;

    fn sample_rules(first_threshold: i64) -> Vec<RuleSet> {
        vec![
            vec![Rule::greater_than(first_threshold), Rule::less_than(100)].into(),
            Rule::within(2, 8).into(),
            Rule::one_of(["Sarah", "jane"]).into(),
            Rule::one_of([1, 12, 66, 77]).into(),
            vec![Rule::one_of(["jane", "Sarah"]), Rule::none_of(["jack"])].into(),
        ]
    }

    fn sample_args() -> Vec<Arg> {
        vec![
            Arg::Int(11),
            Arg::Float(5.6),
            Arg::from("Sarah"),
            Arg::Int(77),
            Arg::from("jane"),
        ]
    }

    #[test]
    fn valid_arguments_pass() {
        assert!(validate(&sample_args(), &sample_rules(7)));
    }

    #[test]
    fn one_failing_position_fails_everything() {
        assert_eq!(
            check(&sample_args(), &sample_rules(15)),
            Err(Violation::Rejected {
                position: 0,
                value: Arg::Int(11)
            })
        );
    }

    #[test]
    fn too_few_arguments() {
        let rules: Vec<RuleSet> = vec![
            vec![Rule::greater_than(2), Rule::less_than(100)].into(),
            Rule::within(2, 8).into(),
            Rule::within(2, 8).into(),
        ];
        assert_eq!(
            check(&[Arg::Int(11), Arg::Float(5.6)], &rules),
            Err(Violation::ArityMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn too_many_arguments() {
        let mut args = sample_args();
        args.push(Arg::Int(66));
        assert!(!validate(&args, &sample_rules(10)));
    }

    #[test]
    fn empty_lists_match() {
        assert!(validate(&[], &[]));
        assert!(!validate(&[Arg::Int(1)], &[]));
    }

    #[test]
    fn ensure_returns_value_unchanged() {
        let set = RuleSet::from(vec![Rule::greater_than(1), Rule::less_than(1000)]);
        assert_eq!(ensure(Arg::Int(674), &set, None), Ok(Arg::Int(674)));
        // no coercion of numeric strings
        assert_eq!(ensure(Arg::from("674"), &set, None), Ok(Arg::from("674")));
    }

    #[test]
    fn ensure_without_default_fails() {
        let set = RuleSet::from(vec![Rule::greater_than(800), Rule::less_than(1000)]);
        assert_eq!(
            ensure(Arg::Int(674), &set, None),
            Err(ValidationFailed {
                value: Arg::Int(674)
            })
        );
        let single = RuleSet::from(Rule::greater_than(800));
        assert!(ensure(Arg::from("saba"), &single, None).is_err());
    }

    #[test]
    fn ensure_with_default() {
        let set = RuleSet::from(vec![Rule::greater_than(800), Rule::less_than(1000)]);
        assert_eq!(
            ensure(Arg::Int(674), &set, Some(Arg::Int(500))),
            Ok(Arg::Int(500))
        );
        let single = RuleSet::from(Rule::greater_than(800));
        assert_eq!(ensure_or(Arg::from("saba"), &single, 444), Arg::Int(444));
        assert_eq!(ensure_or(Arg::Int(900), &single, 444), Arg::Int(900));
    }

    #[test]
    fn falsy_defaults_are_still_defaults() {
        let set = RuleSet::from(Rule::greater_than(800));
        assert_eq!(ensure(Arg::Int(1), &set, Some(Arg::Int(0))), Ok(Arg::Int(0)));
        assert_eq!(
            ensure(Arg::Int(1), &set, Some(Arg::from(""))),
            Ok(Arg::from(""))
        );
        assert_eq!(
            ensure(Arg::Int(1), &set, Some(Arg::Bool(false))),
            Ok(Arg::Bool(false))
        );
    }

    #[test]
    fn or_group_inside_position() {
        let rules = vec![
            RuleSet::from(Rule::is_string()),
            RuleSet::all([
                Rule::is_string().into(),
                Slot::any_of([Rule::one_of([">", "<"]), Rule::one_of(["="])]),
            ]),
            RuleSet::from(Rule::is_int()),
        ];
        assert!(validate(
            &[Arg::from("age"), Arg::from("="), Arg::Int(18)],
            &rules
        ));
        assert!(!validate(
            &[Arg::from("age"), Arg::from("LIKE"), Arg::Int(18)],
            &rules
        ));
    }
}
