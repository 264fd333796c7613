//! Pagination for linkshelf.
//!
//! Slices a filtered list into pages and computes the navigation window.

/// Maximum number of numbered page links in the navigation bar.
pub const MAX_PAGE_LINKS: usize = 5;

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number after clamping.
    pub current_page: usize,
    /// `ceil(total_items / items_per_page)`; zero for an empty list.
    pub total_pages: usize,
    pub total_items: usize,
}

/// Total number of pages for `count` items.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1))
}

/// Clamps a requested page into `1..=total_pages` (1 when there are no pages).
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    if requested < 1 {
        return 1;
    }
    let requested = requested as u64;
    if total_pages == 0 {
        1
    } else if requested > total_pages as u64 {
        total_pages
    } else {
        requested as usize
    }
}

/// Returns the clamped page of `items`.
pub fn paginate<T>(items: &[T], items_per_page: usize, requested_page: i64) -> Page<'_, T> {
    let per_page = items_per_page.max(1);
    let total_pages = total_pages(items.len(), per_page);
    let current_page = clamp_page(requested_page, total_pages);
    let start = ((current_page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items: items.len(),
    }
}

/// Page links to render around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    /// First numbered link in the window.
    pub start: usize,
    /// Last numbered link in the window.
    pub end: usize,
}

impl PageWindow {
    /// Computes the window, or `None` when navigation is not needed (≤ 1 page).
    pub fn compute(current_page: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current_page = current_page.clamp(1, total_pages);
        let half = MAX_PAGE_LINKS / 2;
        let mut start = current_page.saturating_sub(half).max(1);
        let end = (start + MAX_PAGE_LINKS - 1).min(total_pages);
        if end - start + 1 < MAX_PAGE_LINKS {
            start = (end + 1).saturating_sub(MAX_PAGE_LINKS).max(1);
        }
        Some(Self {
            current_page,
            total_pages,
            start,
            end,
        })
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    /// A separate link to page 1 precedes the window.
    pub fn show_first(&self) -> bool {
        self.start > 1
    }

    pub fn leading_ellipsis(&self) -> bool {
        self.start > 2
    }

    /// A separate link to the last page follows the window.
    pub fn show_last(&self) -> bool {
        self.end < self.total_pages
    }

    pub fn trailing_ellipsis(&self) -> bool {
        self.end + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
