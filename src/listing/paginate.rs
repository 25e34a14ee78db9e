//! Fixed-size pagination and the visible page-number window.

use serde::Serialize;
use std::num::NonZeroUsize;

/// Papers per page on the listing screen
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of page buttons shown at once
pub const PAGE_WINDOW_SIZE: usize = 5;

/// One page of a sequence together with its page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSlice<'a, T> {
    /// Items on the requested page (empty when the page is out of range)
    pub items: &'a [T],

    /// Requested page number, as given
    pub page: i64,

    /// Page size used for slicing
    pub page_size: usize,

    /// Length of the whole sequence
    pub total_items: usize,

    /// `ceil(total_items / page_size)`, 0 for an empty sequence
    pub total_pages: usize,
}

impl<'a, T> PageSlice<'a, T> {
    /// Whether the requested page lies in `[1, total_pages]`
    pub fn is_valid(&self) -> bool {
        page_in_range(self.page, self.total_pages)
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages as i64
    }

    /// Visible page numbers for this page
    pub fn window(&self) -> PageWindow {
        page_window(self.page, self.total_pages)
    }
}

/// Number of pages needed for `total_items`
pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get())
}

fn page_in_range(page: i64, total_pages: usize) -> bool {
    page >= 1 && (page as u64) <= total_pages as u64
}

/// Slice out one page of `items`
///
/// Any page number is accepted: pages before the first or after the last
/// yield an empty slice.
pub fn paginate<T>(items: &[T], page: i64, page_size: NonZeroUsize) -> PageSlice<'_, T> {
    let total_items = items.len();
    let size = page_size.get();

    let slice = if page < 1 {
        &items[..0]
    } else {
        let start = usize::try_from(page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(size)
            .min(total_items);
        let end = start.saturating_add(size).min(total_items);
        &items[start..end]
    };

    PageSlice {
        items: slice,
        page,
        page_size: size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

/// The page buttons shown by the pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Consecutive page numbers to render as buttons
    pub pages: Vec<usize>,

    /// Render a jump-to-first button and an ellipsis before the window
    pub show_start_ellipsis: bool,

    /// Render an ellipsis and a jump-to-last button after the window
    pub show_end_ellipsis: bool,
}

/// Compute which page numbers to show for the current page
///
/// All pages are shown when there are at most five. Otherwise the first
/// five are shown near the start, the last five near the end, and a window
/// centered on the current page in between.
pub fn page_window(current: i64, total_pages: usize) -> PageWindow {
    let total = total_pages as i64;
    let width = PAGE_WINDOW_SIZE as i64;
    let lead = width / 2;

    let (first, last) = if total <= width {
        (1, total)
    } else if current <= lead + 1 {
        (1, width)
    } else if current >= total - lead {
        (total - width + 1, total)
    } else {
        (current - lead, current + lead)
    };

    PageWindow {
        pages: (first..=last).map(|p| p as usize).collect(),
        show_start_ellipsis: current > lead + 1 && total > width,
        show_end_ellipsis: current < total - lead && total > width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_thirteen_items_three_pages() {
        let items: Vec<usize> = (0..13).collect();
        let page = paginate(&items, 2, size(6));

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &[6, 7, 8, 9, 10, 11]);
        assert!(page.is_valid());
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = paginate(&items, 3, size(6));
        assert_eq!(last.items, &[12]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_single_result() {
        let items = vec!["only"];
        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.total_pages, 1);
        assert_eq!(first.items.len(), 1);

        for page in 2..5 {
            let slice = paginate(&items, page, DEFAULT_PAGE_SIZE);
            assert!(slice.items.is_empty());
            assert!(!slice.is_valid());
        }
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, DEFAULT_PAGE_SIZE);

        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.is_valid());
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items: Vec<usize> = (0..10).collect();
        for page in [i64::MIN, -3, 0, 3, 100, i64::MAX] {
            let slice = paginate(&items, page, size(5));
            assert!(slice.items.is_empty(), "page {page} should be empty");
            assert!(!slice.is_valid());
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, size(6)), 0);
        assert_eq!(total_pages(6, size(6)), 1);
        assert_eq!(total_pages(7, size(6)), 2);
        assert_eq!(total_pages(1, size(1)), 1);
    }

    #[test]
    fn test_window_small_total_shows_everything() {
        let window = page_window(2, 4);
        assert_eq!(window.pages, vec![1, 2, 3, 4]);
        assert!(!window.show_start_ellipsis);
        assert!(!window.show_end_ellipsis);

        assert!(page_window(1, 0).pages.is_empty());
    }

    #[test]
    fn test_window_near_start() {
        let window = page_window(3, 10);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.show_start_ellipsis);
        assert!(window.show_end_ellipsis);
    }

    #[test]
    fn test_window_at_end() {
        let window = page_window(8, 8);
        assert_eq!(window.pages, vec![4, 5, 6, 7, 8]);
        assert!(window.show_start_ellipsis);
        assert!(!window.show_end_ellipsis);

        assert_eq!(page_window(6, 8).pages, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_window_centered() {
        let window = page_window(5, 10);
        assert_eq!(window.pages, vec![3, 4, 5, 6, 7]);
        assert!(window.show_start_ellipsis);
        assert!(window.show_end_ellipsis);
    }

    #[test]
    fn test_window_with_out_of_range_current() {
        assert_eq!(page_window(0, 9).pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(42, 9).pages, vec![5, 6, 7, 8, 9]);
    }
}
