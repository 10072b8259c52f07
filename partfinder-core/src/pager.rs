//! Client-side pagination of product results.

/// Rows shown per result page.
pub const PAGE_SIZE: usize = 30;

/// Page links shown on each side of the current page.
const WINDOW_RADIUS: usize = 2;

/// Page navigation state over an owned result list.
///
/// Pages are 1-based. An empty result list still has one (empty) page.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

/// Numbered page links around the current page, plus the markers a pager
/// control renders at its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    /// Show a standalone link to page 1.
    pub first_link: bool,
    /// Pages were skipped between page 1 and the window.
    pub leading_ellipsis: bool,
    /// Pages were skipped between the window and the last page.
    pub trailing_ellipsis: bool,
    /// Show a standalone link to the last page.
    pub last_link: bool,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Paginator<T> {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    /// A zero page size is treated as one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Replaces the result list and returns to page 1.
    pub fn set_results(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// Items on the current page.
    pub fn page(&self) -> &[T] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Moves to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages());
        self.current_page
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current_page + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Pager controls are hidden when everything fits on one page.
    pub fn controls_visible(&self) -> bool {
        self.items.len() > self.page_size
    }

    pub fn window(&self) -> PageWindow {
        let total = self.total_pages();
        let start = self.current_page.saturating_sub(WINDOW_RADIUS).max(1);
        let end = (self.current_page + WINDOW_RADIUS).min(total);

        PageWindow {
            pages: (start..=end).collect(),
            first_link: start > 1,
            leading_ellipsis: start > 2,
            trailing_ellipsis: end + 1 < total,
            last_link: end < total,
        }
    }
}
