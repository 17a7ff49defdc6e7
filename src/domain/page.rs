//! Pagination window and paged result container.

use serde::Serialize;

const MAX_ROW_OFFSET: u64 = i64::MAX.unsigned_abs();

/// A clamped 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Builds a window from already-parsed values.
    ///
    /// `page` below 1 becomes 1. `limit` below 1 becomes `default_limit`, and
    /// anything above `max_limit` is capped. `page` is also capped so the row
    /// offset always fits in SQLite's signed 64-bit integer.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: u64, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);
        let limit = limit
            .and_then(|l| u64::try_from(l).ok())
            .filter(|l| *l >= 1)
            .unwrap_or(default_limit)
            .clamp(1, max_limit);
        let page = page
            .and_then(|p| u64::try_from(p).ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
            .min(MAX_ROW_OFFSET / limit);

        Self { page, limit }
    }

    /// Builds a window from raw query-string values; anything non-numeric
    /// counts as unset.
    #[must_use]
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(limit), default_limit, max_limit)
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Zero-based page index, as sea-orm paginators expect.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.page - 1
    }

    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, window: Pagination) -> Self {
        Self {
            items,
            total,
            page: window.page(),
            limit: window.limit(),
            total_pages: window.total_pages(total),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let p = Pagination::from_query(None, None, 10, 100);
        assert_eq!((p.page(), p.limit(), p.offset()), (1, 10, 0));
    }

    #[test]
    fn test_non_numeric_falls_back() {
        let p = Pagination::from_query(Some("abc"), Some("x1"), 10, 100);
        assert_eq!((p.page(), p.limit()), (1, 10));
    }

    #[test]
    fn test_clamping() {
        let p = Pagination::new(Some(0), Some(0), 10, 100);
        assert_eq!((p.page(), p.limit()), (1, 10));

        let p = Pagination::new(Some(-3), Some(-1), 20, 100);
        assert_eq!((p.page(), p.limit()), (1, 20));

        let p = Pagination::new(Some(2), Some(5000), 10, 100);
        assert_eq!((p.page(), p.limit()), (2, 100));
    }

    #[test]
    fn test_huge_page_keeps_offset_in_range() {
        let max = i64::MAX.unsigned_abs();
        for limit in [1, 10, 100] {
            let p = Pagination::new(Some(i64::MAX), Some(limit), 10, 100);
            assert!(p.offset() <= max, "limit {limit}: {}", p.offset());
            assert!(p.limit() * p.page() <= max);
        }

        let p = Pagination::from_query(Some("9223372036854775807"), Some("10"), 10, 100);
        assert_eq!(p.page(), max / 10);
    }

    #[test]
    fn test_offset_and_total_pages() {
        let p = Pagination::new(Some(3), Some(2), 10, 100);
        assert_eq!(p.offset(), 4);
        assert_eq!(p.index(), 2);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(3), 2);
        assert_eq!(p.total_pages(4), 2);
        assert_eq!(p.total_pages(5), 3);
    }

    #[test]
    fn test_page_map_keeps_counts() {
        let window = Pagination::new(Some(2), Some(2), 10, 100);
        let page = Page::new(vec![1, 2], 5, window).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }
}
