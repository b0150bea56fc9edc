use crate::domain::DEFAULT_ITEMS_PER_PAGE;

/// 1-based page position over the processed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    /// `items_per_page` of zero is treated as one.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Zero when there are no rows.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.items_per_page)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to `page`, clamped to the pages that exist. With no rows the
    /// only valid page is 1.
    pub fn set_page(&mut self, page: usize, total: usize) {
        let last = self.page_count(total).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next(&mut self, total: usize) {
        self.set_page(self.page + 1, total);
    }

    pub fn prev(&mut self, total: usize) {
        self.set_page(self.page.saturating_sub(1), total);
    }

    pub fn last(&mut self, total: usize) {
        self.set_page(self.page_count(total), total);
    }

    /// Pull the page back after the row count shrank.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    pub fn slice<'s, T>(&self, rows: &'s [T]) -> &'s [T] {
        let begin = (self.page - 1).saturating_mul(self.items_per_page);
        if begin >= rows.len() {
            return &[];
        }
        let end = std::cmp::min(begin + self.items_per_page, rows.len());
        &rows[begin..end]
    }
}
