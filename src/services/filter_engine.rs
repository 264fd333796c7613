//! Filter/Sort engine for linkshelf.
//!
//! Pure functions that turn the raw bookmark list into the ordered sequence
//! shown to the user. The input slice is never modified.

use std::cmp::Ordering;

use crate::types::bookmark::Bookmark;
use crate::types::filter::{DateRange, FilterCriteria, SortKey};

/// Applies search, date range and sort to `bookmarks`, returning a new list.
pub fn apply(bookmarks: &[Bookmark], criteria: &FilterCriteria) -> Vec<Bookmark> {
    let needle = criteria.search.to_lowercase();
    let mut filtered: Vec<Bookmark> = bookmarks
        .iter()
        .filter(|b| matches_search(b, &needle) && within_range(b, &criteria.date_range))
        .cloned()
        .collect();
    sort_bookmarks(&mut filtered, criteria.sort);
    filtered
}

/// Case-insensitive substring match on title or URL. `needle` must already be lowercase.
fn matches_search(bookmark: &Bookmark, needle: &str) -> bool {
    needle.is_empty()
        || bookmark.title.to_lowercase().contains(needle)
        || bookmark.url.to_lowercase().contains(needle)
}

fn within_range(bookmark: &Bookmark, range: &DateRange) -> bool {
    match range.bounds() {
        Some((from, to)) => bookmark.created_date >= from && bookmark.created_date <= to,
        None => true,
    }
}

/// Stable in-place sort by the given key.
pub fn sort_bookmarks(bookmarks: &mut [Bookmark], key: SortKey) {
    match key {
        SortKey::DateDesc => {
            bookmarks.sort_by(|a, b| b.timestamp_millis().cmp(&a.timestamp_millis()))
        }
        SortKey::DateAsc => {
            bookmarks.sort_by(|a, b| a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        SortKey::Title => bookmarks.sort_by(|a, b| locale_compare(&a.title, &b.title)),
    }
}

/// Locale-aware string ordering.
///
/// Compares by Unicode lowercase first; strings that only differ in case put
/// the lowercase form first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or(Ordering::Equal)
    })
}
