//! Page-number pagination for post listings.
//!
//! A listing always has at least one page. Requested page numbers never
//! fail: anything that is not an integer resolves to the first page and
//! anything out of range resolves to the last one.

use serde::Serialize;

/// Splits a listing of `count` items into pages of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u64,
}

/// The slice of the listing a resolved page number covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Paginator {
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn num_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw `?page=` value against a listing of `count` items.
    pub fn window(&self, count: u64, requested: Option<&str>) -> PageWindow {
        let num_pages = self.num_pages(count);
        let number = match requested.map(str::trim).map(str::parse::<i64>) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 => num_pages,
            Some(Ok(n)) => (n as u64).min(num_pages),
        };

        PageWindow {
            number,
            num_pages,
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
        }
    }

    /// Wrap the items fetched for `window` into a page.
    pub fn page<T>(&self, items: Vec<T>, window: PageWindow, count: u64) -> Page<T> {
        Page {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count,
            per_page: self.per_page,
        }
    }
}

/// One page of a listing plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_other_pages(&self) -> bool {
        self.has_next() || self.has_previous()
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 for an empty listing.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> u64 {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.per_page
        }
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_has_one_page() {
        let paginator = Paginator::new(10);
        let window = paginator.window(0, None);

        assert_eq!(window.num_pages, 1);
        assert_eq!(window.number, 1);
        assert_eq!(window.offset, 0);

        let page: Page<u8> = paginator.page(vec![], window, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
    }

    #[test]
    fn test_num_pages_rounds_up() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.num_pages(10), 1);
        assert_eq!(paginator.num_pages(11), 2);
        assert_eq!(paginator.num_pages(13), 2);
    }

    #[test]
    fn test_page_number_resolution() {
        let paginator = Paginator::new(10);

        assert_eq!(paginator.window(13, Some("2")).number, 2);
        assert_eq!(paginator.window(13, Some(" 2 ")).number, 2);
        // Not an integer: first page.
        assert_eq!(paginator.window(13, Some("two")).number, 1);
        assert_eq!(paginator.window(13, Some("2.0")).number, 1);
        assert_eq!(paginator.window(13, Some("")).number, 1);
        // Out of range: last page.
        assert_eq!(paginator.window(13, Some("3")).number, 2);
        assert_eq!(paginator.window(13, Some("0")).number, 2);
        assert_eq!(paginator.window(13, Some("-4")).number, 2);
    }

    #[test]
    fn test_window_offsets() {
        let paginator = Paginator::new(10);
        let window = paginator.window(13, Some("2"));

        assert_eq!(window.offset, 10);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn test_page_navigation() {
        let paginator = Paginator::new(10);
        let first = paginator.page((1..=10).collect::<Vec<u64>>(), paginator.window(13, None), 13);
        let last = paginator.page(vec![11, 12, 13], paginator.window(13, Some("2")), 13);

        assert_eq!(first.next_page_number(), Some(2));
        assert_eq!(first.previous_page_number(), None);
        assert_eq!((first.start_index(), first.end_index()), (1, 10));
        assert!(first.has_other_pages());

        assert_eq!(last.next_page_number(), None);
        assert_eq!(last.previous_page_number(), Some(1));
        assert_eq!((last.start_index(), last.end_index()), (11, 13));
        assert_eq!(last.len(), 3);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(Paginator::new(0).per_page(), 1);
    }
}
