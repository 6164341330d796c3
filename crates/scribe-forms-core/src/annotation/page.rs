//! Fixed-size page arithmetic over the form's item list.

use std::ops::Range;

/// Maps 1-based page numbers onto index ranges of a list.
///
/// Pages outside `1..=page_count()` map to the empty range rather than an
/// error; the last page may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total: usize,
    items_per_page: usize,
}

impl Pagination {
    /// Pages `total` items in chunks of `items_per_page`.
    ///
    /// A page size of zero is treated as one so that page arithmetic stays
    /// defined.
    #[must_use]
    pub fn new(total: usize, items_per_page: usize) -> Self {
        Self {
            total,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Number of pages; zero when there are no items.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.items_per_page)
    }

    /// Index range covered by 1-based `page`; empty when out of range.
    #[must_use]
    pub fn page_range(&self, page: usize) -> Range<usize> {
        if page == 0 || page > self.page_count() {
            return 0..0;
        }
        let start = (page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.total);
        start..end
    }
}
