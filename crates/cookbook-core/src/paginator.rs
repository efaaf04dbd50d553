use std::ops::RangeInclusive;

/// Number of recipes shown per page.
pub const PAGE_SIZE: usize = 4;

/// Number of pages needed for `len` items. Never less than 1.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Tracks the current page over a filtered collection.
///
/// The current page is only clamped when navigating. A filter change that
/// shrinks the collection can leave it past the last page, in which case
/// `slice` returns an empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.page_size)
    }

    /// Page numbers offered for navigation, 1 through the page count.
    pub fn page_numbers(&self, len: usize) -> RangeInclusive<usize> {
        1..=self.page_count(len)
    }

    /// Move to page `n`, clamped into `[1, page_count]`.
    pub fn go_to(&mut self, n: usize, len: usize) -> usize {
        self.current_page = n.clamp(1, self.page_count(len));
        self.current_page
    }

    pub fn next(&mut self, len: usize) -> usize {
        self.go_to(self.current_page.saturating_add(1), len)
    }

    pub fn prev(&mut self, len: usize) -> usize {
        self.go_to(self.current_page.saturating_sub(1), len)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current_page < self.page_count(len)
    }

    /// The visible page of `items`. Clipped to the available length.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
