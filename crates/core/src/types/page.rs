//! Page-based slicing of catalog listings.

use serde::{Deserialize, Serialize};

/// A request for one page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Create a request; `page` and `page_size` are raised to at least 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// The first page with the given size.
    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// The page after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.page_size)
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let offset = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Number of items covered by this page and every page before it.
    #[must_use]
    pub fn covered(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    /// Whether items remain after this page, given the known total.
    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.covered() < total as u64
    }
}

/// One page of results plus what is known about the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    /// Total number of items known to the source.
    pub total: usize,
}

impl<T: Clone> Page<T> {
    /// Slice one page out of a complete in-memory list.
    #[must_use]
    pub fn slice(all: &[T], request: PageRequest) -> Self {
        let page_size = usize::try_from(request.page_size).unwrap_or(usize::MAX);
        let items = all
            .iter()
            .skip(request.offset())
            .take(page_size)
            .cloned()
            .collect();

        Self {
            items,
            has_more: request.has_more(all.len()),
            total: all.len(),
        }
    }
}

impl<T> Page<T> {
    /// An empty page for an empty source.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_pages_through_thirty_items() {
        let all: Vec<u32> = (0..30).collect();

        let first = Page::slice(&all, PageRequest::new(1, 12));
        assert_eq!(first.items.len(), 12);
        assert!(first.has_more);

        let third = Page::slice(&all, PageRequest::new(3, 12));
        assert_eq!(third.items, (24..30).collect::<Vec<_>>());
        assert!(!third.has_more);
        assert_eq!(third.total, 30);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let all = vec!["a", "b"];
        let page = Page::slice(&all, PageRequest::new(5, 8));
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_exact_multiple_has_no_more() {
        let all: Vec<u32> = (0..16).collect();
        assert!(!Page::slice(&all, PageRequest::new(2, 8)).has_more);
    }

    #[test]
    fn test_request_is_one_based() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request, PageRequest::new(1, 1));
        assert_eq!(request.offset(), 0);
        assert_eq!(PageRequest::new(3, 8).offset(), 16);
    }

    #[test]
    fn test_next_keeps_page_size() {
        let next = PageRequest::first(12).next();
        assert_eq!(next, PageRequest::new(2, 12));
        assert_eq!(next.offset(), 12);
        assert_eq!(PageRequest::new(u32::MAX, 4).next().page, u32::MAX);
    }
}
