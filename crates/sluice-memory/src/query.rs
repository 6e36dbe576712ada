//! Tables and the queries built against them.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use sluice_dispatch::{Backend, Comparison, Conditions, Dir, PageMeta};
use sluice_notation::Arg;
use tracing::trace;

use crate::condition::{Clauses, Condition};
use crate::record::Record;
use crate::value::compare_values;

/// A shared, immutable set of rows.
#[derive(Clone)]
pub struct MemoryTable<T> {
    rows: Arc<Vec<T>>,
}

impl<T> MemoryTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Starts a query matching every row, in insertion order.
    pub fn query(&self) -> MemoryQuery<T> {
        MemoryQuery {
            rows: Arc::clone(&self.rows),
            clauses: Clauses::new(),
            orderings: Vec::new(),
            window: None,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> FromIterator<T> for MemoryTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> fmt::Debug for MemoryTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTable")
            .field("rows", &self.rows.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    limit: u64,
    offset: u64,
}

/// An accumulating query over a [`MemoryTable`].
///
/// Cloning copies the query state and shares the rows.
pub struct MemoryQuery<T> {
    rows: Arc<Vec<T>>,
    clauses: Clauses,
    orderings: Vec<(String, Dir)>,
    window: Option<Window>,
}

impl<T> Clone for MemoryQuery<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            clauses: self.clauses.clone(),
            orderings: self.orderings.clone(),
            window: self.window,
        }
    }
}

impl<T> fmt::Debug for MemoryQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryQuery")
            .field("rows", &self.rows.len())
            .field("clauses", &self.clauses)
            .field("orderings", &self.orderings)
            .field("window", &self.window)
            .finish()
    }
}

impl<T: Record> MemoryQuery<T> {
    pub fn and_where(mut self, column: &str, cmp: Comparison, value: impl Into<Arg>) -> Self {
        self.clauses.and(Condition::new(column, cmp, value));
        self
    }

    pub fn or_where(mut self, column: &str, cmp: Comparison, value: impl Into<Arg>) -> Self {
        self.clauses.or(Condition::new(column, cmp, value));
        self
    }

    pub fn order_by(mut self, column: &str, dir: Dir) -> Self {
        self.orderings.push((column.to_string(), dir));
        self
    }

    pub fn limit_offset(mut self, limit: u64, offset: u64) -> Self {
        self.window = Some(Window { limit, offset });
        self
    }

    pub fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    pub fn orderings(&self) -> &[(String, Dir)] {
        &self.orderings
    }

    /// Rows matching the clauses, ignoring order and window.
    pub fn count(&self) -> usize {
        self.rows.iter().filter(|row| self.clauses.matches(*row)).count()
    }

    /// Matching rows, ordered and windowed.
    ///
    /// Sorting is stable: rows that compare equal on every ordering keep
    /// their insertion order.
    pub fn select(&self) -> Vec<&T> {
        let mut matched: Vec<&T> = self
            .rows
            .iter()
            .filter(|row| self.clauses.matches(*row))
            .collect();

        if !self.orderings.is_empty() {
            matched.sort_by(|a, b| self.compare(a, b));
        }

        let Some(window) = self.window else {
            return matched;
        };
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        matched.into_iter().skip(offset).take(limit).collect()
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        for (column, dir) in &self.orderings {
            let ordering = compare_values(&a.field(column), &b.field(column));
            match ordering.map(|o| apply(*dir, o)) {
                Some(Ordering::Equal) | None => continue,
                Some(decided) => return decided,
            }
        }
        Ordering::Equal
    }
}

fn apply(dir: Dir, ordering: Ordering) -> Ordering {
    match dir {
        Dir::Asc => ordering,
        Dir::Desc => ordering.reverse(),
    }
}

impl<T: Record + Clone> Backend for MemoryQuery<T> {
    type Row = T;

    fn apply_order(&mut self, column: &str, dir: Dir) -> anyhow::Result<()> {
        self.orderings.push((column.to_string(), dir));
        Ok(())
    }

    fn apply_limit_offset(&mut self, limit: u64, offset: u64) -> anyhow::Result<()> {
        self.window = Some(Window { limit, offset });
        Ok(())
    }

    fn total_and_meta(&mut self, per_page: u64, page: u64) -> anyhow::Result<PageMeta> {
        let total = self.count() as u64;
        trace!(total, "counted matching rows");
        Ok(PageMeta::new(page, per_page, total))
    }

    fn fetch_rows(&mut self) -> anyhow::Result<Vec<T>> {
        let rows: Vec<T> = self.select().into_iter().cloned().collect();
        trace!(returned = rows.len(), "fetched rows");
        Ok(rows)
    }
}

impl<T: Record + Clone> Conditions for MemoryQuery<T> {
    fn and_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()> {
        self.clauses.and(Condition::new(column, cmp, value.clone()));
        Ok(())
    }

    fn or_where(&mut self, column: &str, cmp: Comparison, value: &Arg) -> anyhow::Result<()> {
        self.clauses.or(Condition::new(column, cmp, value.clone()));
        Ok(())
    }
}
