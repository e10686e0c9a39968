//! Caller-owned paging cursor.

/// Paging cursor for asset queries.
///
/// The caller sets `current_page` (1-indexed) and `items_per_page`; the
/// store calls [`Pager::configure`] with the post-filter total, which
/// derives `total_items` and `page_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// Current page number (1-indexed).
    pub current_page: usize,
    /// Number of items per page.
    pub items_per_page: usize,
    total_items: usize,
    page_count: usize,
}

impl Pager {
    /// Create a pager for the given page and page size.
    pub fn new(current_page: usize, items_per_page: usize) -> Self {
        Self {
            current_page,
            items_per_page,
            total_items: 0,
            page_count: 0,
        }
    }

    /// Record the total item count and derive the page count.
    ///
    /// An empty result set still has one (empty) page.
    pub fn configure(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page_count = if total_items == 0 || self.items_per_page == 0 {
            1
        } else {
            total_items.div_ceil(self.items_per_page)
        };
    }

    /// Total item count recorded by the last `configure` call.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Page count derived by the last `configure` call.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of items to skip for the current page.
    pub fn offset(&self) -> usize {
        self.current_page.saturating_sub(1) * self.items_per_page
    }

    /// Number of items to take for the current page.
    pub fn limit(&self) -> usize {
        self.items_per_page
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1, 20)
    }
}
