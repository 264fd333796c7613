//! Plain-text rendering of the bookmark board.

use std::fmt::Write as _;

use chrono::Local;

use crate::managers::bookmark_board::BoardView;
use crate::services::pagination::PageWindow;
use crate::types::bookmark::Bookmark;
use crate::types::notification::{Toast, ToastLevel};
use crate::types::settings::DisplaySettings;

const MAX_TITLE_CHARS: usize = 60;
const MAX_VISIT_BADGE: u64 = 99;

/// Renders the current page of cards followed by the navigation bar.
pub fn render_view(view: &BoardView) -> String {
    if view.is_empty() {
        return "No bookmarks found.\n".to_string();
    }

    let mut out = String::new();
    for bookmark in &view.items {
        out.push_str(&render_card(bookmark));
    }
    let _ = writeln!(
        out,
        "{} bookmark{} · page {} of {}",
        view.total_items,
        if view.total_items == 1 { "" } else { "s" },
        view.current_page,
        view.total_pages
    );
    if let Some(window) = &view.window {
        out.push_str(&render_pagination(window));
        out.push('\n');
    }
    out
}

/// One bookmark card: title with visit badge, domain and date, then the link.
pub fn render_card(bookmark: &Bookmark) -> String {
    let mut out = String::new();
    let title = if bookmark.title.trim().is_empty() {
        bookmark.domain()
    } else {
        truncate(&bookmark.title, MAX_TITLE_CHARS)
    };
    let _ = write!(out, "[{}] {}", bookmark.id, title);
    if let Some(badge) = visit_badge(bookmark.visit_count) {
        let _ = write!(out, "  ({} visits)", badge);
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "     {} · {}",
        bookmark.domain(),
        bookmark.created_date.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(out, "     {}", bookmark.url);
    if let Some(thumb) = &bookmark.thumbnail {
        let _ = writeln!(out, "     thumbnail: {}", thumb);
    }
    out
}

/// Badge text for a visit count; `None` when never visited.
pub fn visit_badge(visits: u64) -> Option<String> {
    match visits {
        0 => None,
        n if n > MAX_VISIT_BADGE => Some(format!("{}+", MAX_VISIT_BADGE)),
        n => Some(n.to_string()),
    }
}

/// Navigation bar such as `‹ Prev  1 … 4 5 [6] 7 8 … 12  Next ›`.
pub fn render_pagination(window: &PageWindow) -> String {
    let mut parts: Vec<String> = Vec::new();
    if window.has_previous() {
        parts.push("‹ Prev ".to_string());
    }
    if window.show_first() {
        parts.push("1".to_string());
        if window.leading_ellipsis() {
            parts.push("…".to_string());
        }
    }
    for page in window.pages() {
        if page == window.current_page {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_last() {
        if window.trailing_ellipsis() {
            parts.push("…".to_string());
        }
        parts.push(window.total_pages.to_string());
    }
    if window.has_next() {
        parts.push(" Next ›".to_string());
    }
    parts.join(" ")
}

pub fn render_settings(settings: &DisplaySettings) -> String {
    format!(
        "refresh interval: {} s\nitems per page:   {}\n",
        settings.refresh_interval / 1000,
        settings.items_per_page
    )
}

pub fn render_toast(toast: &Toast) -> String {
    let tag = match toast.level {
        ToastLevel::Success => "ok",
        ToastLevel::Info => "info",
        ToastLevel::Warning => "warn",
        ToastLevel::Error => "error",
    };
    format!("[{}] {}", tag, toast.message)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
