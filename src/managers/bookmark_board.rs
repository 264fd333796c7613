//! Bookmark board for linkshelf.
//!
//! Holds the transient in-memory copy of the bookmark list together with the
//! active filters and current page, and runs the edit/delete/visit actions
//! against the backend. Failures are surfaced through the [`Notifier`].

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use crate::services::api_client::BookmarkApi;
use crate::services::filter_engine;
use crate::services::notifier::Notifier;
use crate::services::pagination::{self, PageWindow};
use crate::types::bookmark::{Bookmark, BookmarkEdit, BookmarkRef};
use crate::types::errors::{ApiError, BookmarkError};
use crate::types::filter::{DateRange, FilterCriteria, SortKey};
use crate::types::settings::DisplaySettings;

#[derive(Debug, Default)]
struct BoardState {
    bookmarks: Vec<Bookmark>,
    criteria: FilterCriteria,
    current_page: usize,
}

/// Everything needed to render one screen of bookmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub items: Vec<Bookmark>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub window: Option<PageWindow>,
    pub criteria: FilterCriteria,
}

impl BoardView {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// In-memory bookmark list plus the actions that mutate it.
pub struct BookmarkBoard<A: BookmarkApi> {
    api: Arc<A>,
    notifier: Notifier,
    settings: watch::Receiver<DisplaySettings>,
    state: Mutex<BoardState>,
}

impl<A: BookmarkApi> BookmarkBoard<A> {
    /// Creates an empty board. Items per page are read from `settings` on every render.
    pub fn new(api: Arc<A>, notifier: Notifier, settings: watch::Receiver<DisplaySettings>) -> Self {
        Self {
            api,
            notifier,
            settings,
            state: Mutex::new(BoardState {
                current_page: 1,
                ..BoardState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Re-fetches the full list. The last response to arrive wins.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        match self.api.fetch_bookmarks().await {
            Ok(bookmarks) => {
                let count = bookmarks.len();
                self.state().bookmarks = bookmarks;
                tracing::debug!(count, "bookmarks refreshed");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading bookmarks");
                self.notifier.error("Failed to load URLs");
                Err(e)
            }
        }
    }

    /// Snapshot of the unfiltered list.
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.state().bookmarks.clone()
    }

    pub fn find(&self, id: i64) -> Option<Bookmark> {
        self.state().bookmarks.iter().find(|b| b.id == id).cloned()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state().criteria.clone()
    }

    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.state().criteria = criteria;
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.state().criteria.search = search.into();
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.state().criteria.sort = sort;
    }

    pub fn set_date_range(&self, range: DateRange) {
        self.state().criteria.date_range = range;
    }

    pub fn current_page(&self) -> usize {
        self.state().current_page
    }

    /// Moves to `page`, clamped into the pages of the filtered list.
    ///
    /// Returns the page actually reached.
    pub fn go_to_page(&self, page: i64) -> usize {
        let per_page = self.settings.borrow().items_per_page;
        let mut state = self.state();
        let filtered = filter_engine::apply(&state.bookmarks, &state.criteria);
        let total = pagination::total_pages(filtered.len(), per_page);
        state.current_page = pagination::clamp_page(page, total);
        state.current_page
    }

    /// Filters, sorts and paginates the list for display.
    ///
    /// The stored page is clamped when the filtered list has shrunk.
    pub fn view(&self) -> BoardView {
        let per_page = self.settings.borrow().items_per_page;
        let mut state = self.state();
        let filtered = filter_engine::apply(&state.bookmarks, &state.criteria);
        let page = pagination::paginate(&filtered, per_page, state.current_page as i64);
        state.current_page = page.current_page;

        BoardView {
            items: page.items.to_vec(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            window: PageWindow::compute(page.current_page, page.total_pages),
            criteria: state.criteria.clone(),
        }
    }

    /// Saves an edit, then reloads the list.
    pub async fn edit(&self, edit: BookmarkEdit) -> Result<(), BookmarkError> {
        let edit = match validate_edit(edit) {
            Ok(edit) => edit,
            Err(e) => {
                self.notifier.warning(e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.api.update_bookmark(&edit).await {
            tracing::error!(id = edit.id, error = %e, "error updating bookmark");
            self.notifier.error(match &e {
                ApiError::Http { .. } => e.user_message(),
                _ => "Failed to update URL".to_string(),
            });
            return Err(e.into());
        }

        self.notifier.success("URL updated successfully");
        let _ = self.refresh().await;
        Ok(())
    }

    /// Deletes a loaded bookmark, then reloads the list.
    pub async fn delete(&self, id: i64) -> Result<(), BookmarkError> {
        let target = match self.find(id) {
            Some(b) => BookmarkRef { id: b.id, url: b.url },
            None => {
                let e = BookmarkError::NotFound(id);
                self.notifier.warning(e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.api.delete_bookmark(&target).await {
            tracing::error!(id, error = %e, "error deleting bookmark");
            self.notifier.error("Failed to delete URL");
            return Err(e.into());
        }

        self.state().bookmarks.retain(|b| b.id != id);
        self.notifier.success("URL deleted successfully");
        let _ = self.refresh().await;
        Ok(())
    }

    /// Records a visit and bumps the local count. Returns the URL to open.
    pub async fn record_visit(&self, id: i64) -> Result<String, BookmarkError> {
        let url = match self.find(id) {
            Some(b) => b.url,
            None => return Err(BookmarkError::NotFound(id)),
        };

        if let Err(e) = self.api.record_visit(id).await {
            // The link still opens; only the counter is stale.
            tracing::warn!(id, error = %e, "failed to record visit");
            self.notifier.warning("Could not record visit");
            return Err(e.into());
        }

        if let Some(b) = self.state().bookmarks.iter_mut().find(|b| b.id == id) {
            b.visit_count += 1;
        }
        Ok(url)
    }
}

/// Normalises edit form input: trims fields, requires a title and an absolute
/// http(s) URL, and turns an empty thumbnail into `None`.
pub fn validate_edit(edit: BookmarkEdit) -> Result<BookmarkEdit, BookmarkError> {
    let title = edit.title.trim().to_string();
    if title.is_empty() {
        return Err(BookmarkError::EmptyTitle);
    }

    let url = edit.url.trim().to_string();
    match url::Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
        _ => return Err(BookmarkError::InvalidUrl(url)),
    }

    let thumbnail = edit
        .thumbnail
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Ok(BookmarkEdit {
        id: edit.id,
        url,
        title,
        thumbnail,
    })
}
