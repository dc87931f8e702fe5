// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::filters::FilterState;
use crate::models::page::PaginationInfo;

/// Page arithmetic for a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total_hits: u64,
    total_pages: u32,
}

impl Pagination {
    /// `page` is clamped to `[1, total_pages]`; there is always at least one page.
    pub fn new(page: u32, page_size: u32, total_hits: u64) -> Self {
        let page_size = page_size.max(1);
        let pages = total_hits.div_ceil(u64::from(page_size)).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        Self {
            page: page.clamp(1, total_pages),
            page_size,
            total_hits,
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page to navigate to, or `None` when the request is a no-op
    /// (out of range or already current).
    pub fn request_page(&self, target: i64) -> Option<u32> {
        if target < 1 || target > i64::from(self.total_pages) {
            return None;
        }
        let target = u32::try_from(target).ok()?;
        (target != self.page).then_some(target)
    }

    /// Same URL with only the page changed, or `None` for a no-op request
    pub fn page_href(&self, path: &str, state: &FilterState, target: i64) -> Option<String> {
        let page = self.request_page(target)?;
        let query = state.with_page(page).to_query_string();
        Some(if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        })
    }

    pub fn info(&self, path: &str, state: &FilterState) -> PaginationInfo {
        let current = i64::from(self.page);
        PaginationInfo {
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_hits: self.total_hits,
            prev_href: self.page_href(path, state, current - 1),
            next_href: self.page_href(path, state, current + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 12, 25).total_pages(), 3);
        assert_eq!(Pagination::new(1, 12, 24).total_pages(), 2);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        assert_eq!(Pagination::new(1, 12, 0).total_pages(), 1);
    }

    #[test]
    fn test_page_clamped_into_range() {
        assert_eq!(Pagination::new(99, 12, 25).page(), 3);
        assert_eq!(Pagination::new(0, 12, 25).page(), 1);
    }

    #[test]
    fn test_out_of_range_requests_are_no_ops() {
        let pagination = Pagination::new(2, 10, 50);
        assert_eq!(pagination.request_page(0), None);
        assert_eq!(pagination.request_page(-1), None);
        assert_eq!(pagination.request_page(6), None);
        assert_eq!(pagination.request_page(2), None);
        assert_eq!(pagination.request_page(1), Some(1));
        assert_eq!(pagination.request_page(5), Some(5));
    }

    #[test]
    fn test_page_href_preserves_other_params() {
        let state = FilterState::from_query(Some("q=rpg&page=2&category=5"));
        let pagination = Pagination::new(state.page, 12, 100);
        assert_eq!(
            pagination.page_href("/search", &state, 3).as_deref(),
            Some("/search?q=rpg&page=3&category=5")
        );
        assert_eq!(
            pagination.page_href("/search", &state, 1).as_deref(),
            Some("/search?q=rpg&category=5")
        );
    }

    #[test]
    fn test_info_links_at_edges() {
        let state = FilterState::default();
        let first = Pagination::new(1, 10, 30).info("/search", &state);
        assert!(first.prev_href.is_none());
        assert_eq!(first.next_href.as_deref(), Some("/search?page=2"));

        let last = Pagination::new(3, 10, 30).info("/search", &state);
        assert_eq!(last.prev_href.as_deref(), Some("/search?page=2"));
        assert!(last.next_href.is_none());
    }

    #[test]
    fn test_single_page_has_no_links() {
        let info = Pagination::new(1, 10, 3).info("/search", &FilterState::default());
        assert!(info.prev_href.is_none());
        assert!(info.next_href.is_none());
        assert_eq!(info.total_hits, 3);
    }
}
