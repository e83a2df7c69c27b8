use std::fmt;
use std::ops::Range;

use serde::{Serialize, Serializer};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Above this many pages the controls collapse into ellipses.
const MAX_UNCOLLAPSED_PAGES: usize = 7;
/// Neighbours shown on each side of the current page.
const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Item indices of the current page within the filtered sequence.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }

    /// New result count; keeps the page inside `[1, max(total_pages, 1)]`.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Zero is rejected; returns whether the size changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.clamp();
        true
    }

    /// Out-of-range requests leave the state untouched.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }

    pub fn tokens(&self) -> Vec<PageToken> {
        page_tokens(self.page, self.total_pages())
    }
}

/// An entry of the pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageToken::Page(page) => write!(f, "{}", page),
            PageToken::Ellipsis => f.write_str("..."),
        }
    }
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageToken::Page(page) => serializer.serialize_u64(*page as u64),
            PageToken::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page numbers for the controls: first, last, and a window around `current`,
/// with an ellipsis over every skipped stretch.
pub fn page_tokens(current: usize, total_pages: usize) -> Vec<PageToken> {
    if total_pages <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let window_start = current.saturating_sub(PAGE_WINDOW).max(1);
    let window_end = (current + PAGE_WINDOW).min(total_pages);

    let mut included = vec![1];
    included.extend(window_start..=window_end);
    included.push(total_pages);
    included.sort_unstable();
    included.dedup();

    let mut tokens = Vec::with_capacity(included.len() + 2);
    let mut previous: Option<usize> = None;
    for page in included {
        if let Some(prev) = previous {
            if page - prev > 1 {
                tokens.push(PageToken::Ellipsis);
            }
        }
        tokens.push(PageToken::Page(page));
        previous = Some(page);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageToken::{Ellipsis, Page};

    #[test]
    fn short_ranges_list_every_page() {
        assert!(page_tokens(1, 0).is_empty());
        assert_eq!(page_tokens(1, 1), vec![Page(1)]);
        assert_eq!(page_tokens(4, 7), (1..=7).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn long_ranges_collapse_around_current() {
        assert_eq!(
            page_tokens(5, 10),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_tokens(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_tokens(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
        // Adjacent to the first page: no ellipsis between 1 and 2.
        assert_eq!(
            page_tokens(4, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(8)]
        );
    }

    #[test]
    fn tokens_serialize_as_numbers_and_ellipsis() {
        let json = serde_json::to_string(&page_tokens(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"...",3,4,5,6,7,"...",10]"#);
    }

    #[test]
    fn page_size_change_clamps_current_page() {
        let mut pagination = Pagination::new(5);
        pagination.set_total_items(23);
        assert_eq!(pagination.total_pages(), 5);
        assert!(pagination.go_to(5));
        assert_eq!(pagination.range(), 20..23);

        assert!(pagination.set_page_size(12));
        assert_eq!(pagination.total_pages(), 2);
        assert_eq!(pagination.page(), 2);
        assert!(!pagination.set_page_size(0));
        assert_eq!(pagination.page_size(), 12);
    }

    #[test]
    fn empty_result_stays_on_page_one() {
        let mut pagination = Pagination::default();
        pagination.set_total_items(0);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.total_pages(), 0);
        assert_eq!(pagination.range(), 0..0);
        assert!(!pagination.go_to(1));
        assert!(!pagination.has_next());
    }
}
