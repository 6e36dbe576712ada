//! Built-in sorting and where-clause operations.
//!
//! | name | arguments | effect |
//! |------|-----------|--------|
//! | `sort` | `column, direction` | orders by `column`, descending when `direction < 0` |
//! | `where` | `column, comparison, value` | ANDs a condition onto the query |
//! | `orWhere` | `column, comparison, value` | ORs a condition onto the query |
//!
//! `comparison` is one of `=`, `!=`, `<`, `>`, `<=`, `>=`, `LIKE`. These
//! operations only check argument shape; column names must still be
//! constrained by the rules given to [`Filter::allow`](crate::Filter::allow).

use sluice_notation::Arg;

use crate::backend::{Backend, Comparison, Conditions, Dir};
use crate::operation::{ArgumentError, Args, Operations};

impl<B: Conditions + 'static> Operations<B> {
    /// A catalog holding `sort`, `where` and `orWhere`.
    pub fn standard() -> Self {
        Operations::new()
            .operation("sort", 2, sort)
            .operation("where", 3, and_where)
            .operation("orWhere", 3, or_where)
    }
}

/// `sort(column, direction)`.
pub fn sort<B: Backend>(backend: &mut B, args: Args<'_>) -> anyhow::Result<()> {
    let column = args.str(0)?;
    let dir = Dir::from_sign(args.number(1)?);
    backend.apply_order(column, dir)
}

/// `where(column, comparison, value)`.
pub fn and_where<B: Conditions>(backend: &mut B, args: Args<'_>) -> anyhow::Result<()> {
    let (column, cmp, value) = condition(args)?;
    backend.and_where(column, cmp, value)
}

/// `orWhere(column, comparison, value)`.
pub fn or_where<B: Conditions>(backend: &mut B, args: Args<'_>) -> anyhow::Result<()> {
    let (column, cmp, value) = condition(args)?;
    backend.or_where(column, cmp, value)
}

fn condition<'a>(args: Args<'a>) -> Result<(&'a str, Comparison, &'a Arg), ArgumentError> {
    let column = args.str(0)?;
    let cmp = args
        .str(1)?
        .parse::<Comparison>()
        .map_err(|e| ArgumentError::Invalid {
            index: 1,
            reason: e.to_string(),
        })?;
    Ok((column, cmp, args.get(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageMeta;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Sql {
        clauses: Vec<String>,
        order: Vec<String>,
    }

    impl Backend for Sql {
        type Row = ();

        fn apply_order(&mut self, column: &str, dir: Dir) -> anyhow::Result<()> {
            self.order.push(format!("{column} {dir}"));
            Ok(())
        }

        fn apply_limit_offset(&mut self, _limit: u64, _offset: u64) -> anyhow::Result<()> {
            Ok(())
        }

        fn total_and_meta(&mut self, per_page: u64, page: u64) -> anyhow::Result<PageMeta> {
            Ok(PageMeta::new(page, per_page, 0))
        }

        fn fetch_rows(&mut self) -> anyhow::Result<Vec<()>> {
            Ok(Vec::new())
        }
    }

    impl Conditions for Sql {
        fn and_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()> {
            self.clauses.push(format!("AND {column} {cmp} {value}"));
            Ok(())
        }

        fn or_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()> {
            self.clauses.push(format!("OR {column} {cmp} {value}"));
            Ok(())
        }
    }

    fn apply(ops: &Operations<Sql>, name: &str, values: &[Arg]) -> anyhow::Result<Sql> {
        let mut sql = Sql::default();
        ops.get(name).unwrap().apply(&mut sql, Args::new(values))?;
        Ok(sql)
    }

    #[test]
    fn standard_catalog() {
        let ops = Operations::<Sql>::standard();
        let mut names: Vec<_> = ops.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["orWhere", "sort", "where"]);
        assert_eq!(ops.get("sort").unwrap().arity(), 2);
        assert_eq!(ops.get("where").unwrap().arity(), 3);
    }

    #[test]
    fn sort_reads_direction_sign() {
        let ops = Operations::<Sql>::standard();
        let sql = apply(&ops, "sort", &[Arg::from("id"), Arg::from("-1")]).unwrap();
        assert_eq!(sql.order, vec!["id DESC"]);
        let sql = apply(&ops, "sort", &[Arg::from("id"), Arg::Int(1)]).unwrap();
        assert_eq!(sql.order, vec!["id ASC"]);
    }

    #[test]
    fn sort_rejects_non_numeric_direction() {
        let ops = Operations::<Sql>::standard();
        let err = apply(&ops, "sort", &[Arg::from("id"), Arg::from("down")]).unwrap_err();
        assert!(err.downcast_ref::<ArgumentError>().is_some());
    }

    #[test]
    fn where_and_or_where() {
        let ops = Operations::<Sql>::standard();
        let args = [Arg::from("age"), Arg::from(">="), Arg::from("30")];
        let sql = apply(&ops, "where", &args).unwrap();
        assert_eq!(sql.clauses, vec!["AND age >= 30"]);
        let args = [Arg::from("name"), Arg::from("LIKE"), Arg::from("i")];
        let sql = apply(&ops, "orWhere", &args).unwrap();
        assert_eq!(sql.clauses, vec!["OR name LIKE i"]);
    }

    #[test]
    fn unknown_comparison_is_an_argument_error() {
        let ops = Operations::<Sql>::standard();
        let args = [Arg::from("age"), Arg::from("<>"), Arg::Int(3)];
        let err = apply(&ops, "where", &args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ArgumentError>(),
            Some(&ArgumentError::Invalid {
                index: 1,
                reason: "unknown comparison operator '<>'".into()
            })
        );
    }
}
