//! Result envelope for paginated queries.

use serde::{Deserialize, Serialize};

/// Pagination metadata.
///
/// Computed from the true total, so a page past the end still reports
/// how many rows exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
    pub total: u64,
    pub from: u64,
    pub to: u64,
}

impl PageMeta {
    /// Derives the metadata for `page` given the total row count.
    ///
    /// ```
    /// use sluice_dispatch::PageMeta;
    ///
    /// let meta = PageMeta::new(2, 3, 10);
    /// assert_eq!((meta.last_page, meta.from, meta.to), (4, 4, 6));
    /// ```
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let last_page = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        let from = page
            .saturating_sub(1)
            .saturating_mul(per_page)
            .saturating_add(1);
        let to = page.saturating_mul(per_page).min(total);

        Self {
            current_page: page,
            per_page,
            last_page,
            total,
            from,
            to,
        }
    }

    /// Row offset of the first row on this page.
    pub fn offset(&self) -> u64 {
        self.from - 1
    }
}

/// One page of rows plus its metadata.
///
/// Serializes as `{"data": [...], "meta": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Pairs rows with their metadata.
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { data, meta }
    }

    /// Transforms every row, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Returns `true` if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of rows on the page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}
