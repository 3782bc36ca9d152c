use std::ops::RangeInclusive;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Fixed-size paging over an in-memory collection. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current: usize,
    total: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
            total: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total
    }

    /// Recompute for a collection of `len` items. The current page is kept
    /// unless it no longer exists, in which case it moves to the last page.
    pub fn update(&mut self, len: usize) {
        self.total = total_pages(len, self.page_size);
        self.current = self.current.clamp(1, self.total.max(1));
    }

    /// Move to `page` if it exists. Out-of-range requests are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// Index of the first item of the current page within `len` items.
    pub fn offset(&self, len: usize) -> usize {
        (self.current - 1).saturating_mul(self.page_size).min(len)
    }

    /// The items on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// `1..=total_pages`; empty when there are no pages.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn forty_five_items_in_pages_of_twenty() {
        let items: Vec<usize> = (0..45).collect();
        let mut p = Pagination::new(20);
        p.update(items.len());
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.slice(&items), &items[0..20]);
        assert!(p.go_to(3));
        assert_eq!(p.slice(&items), &items[40..45]);
    }

    #[test]
    fn pages_concatenate_to_the_collection() {
        for len in [0usize, 1, 19, 20, 21, 40, 59, 60, 61] {
            for size in [1usize, 3, 20] {
                let items: Vec<usize> = (0..len).collect();
                let mut p = Pagination::new(size);
                p.update(len);
                assert_eq!(p.total_pages(), len.div_ceil(size));
                let mut joined = Vec::new();
                for page in p.page_numbers() {
                    assert!(p.go_to(page));
                    joined.extend_from_slice(p.slice(&items));
                }
                assert_eq!(joined, items, "len={len} size={size}");
            }
        }
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let mut p = Pagination::new(20);
        p.update(0);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.page_numbers().count(), 0);
        assert_eq!(p.current(), 1);
        assert!(!p.go_to(1));
        assert!(p.slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut p = Pagination::new(10);
        p.update(25);
        assert!(!p.go_to(0));
        assert!(!p.go_to(4));
        assert_eq!(p.current(), 1);
    }

    #[test]
    fn current_page_clamps_when_collection_shrinks() {
        let mut p = Pagination::new(10);
        p.update(25);
        assert!(p.go_to(3));
        p.update(21);
        assert_eq!(p.current(), 3);
        p.update(20);
        assert_eq!(p.current(), 2);
        p.update(0);
        assert_eq!(p.current(), 1);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        assert_eq!(Pagination::new(0).page_size(), 1);
        assert_eq!(total_pages(3, 0), 3);
    }
}
