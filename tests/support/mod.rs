//! Shared fixtures for the integration tests.

#![allow(dead_code)]


use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use linkshelf::services::api_client::{BookmarkApi, SettingsRemote};
use linkshelf::types::bookmark::{Bookmark, BookmarkEdit, BookmarkRef};
use linkshelf::types::errors::ApiError;
use linkshelf::types::settings::DisplaySettings;

/// Builds a bookmark created `minutes` after 2024-01-01 00:00 UTC.
pub fn bookmark(id: i64, title: &str, url: &str, minutes: i64) -> Bookmark {
    Bookmark {
        id,
        url: url.to_string(),
        title: title.to_string(),
        thumbnail: None,
        created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::minutes(minutes),
        visit_count: 0,
    }
}

/// `count` bookmarks with ids 1..=count, oldest first.
pub fn numbered(count: usize) -> Vec<Bookmark> {
    (1..=count as i64)
        .map(|i| bookmark(i, &format!("Bookmark {}", i), &format!("https://site{}.com", i), i))
        .collect()
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub bookmarks: Vec<Bookmark>,
    pub remote_settings: Option<DisplaySettings>,
    pub fail_fetch: bool,
    pub fail_mutations: bool,
    pub fail_settings: bool,
    pub fetch_calls: usize,
    pub updates: Vec<BookmarkEdit>,
    pub deletes: Vec<BookmarkRef>,
    pub visits: Vec<i64>,
    pub stored_settings: Vec<DisplaySettings>,
}

/// In-memory backend that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().bookmarks = bookmarks;
        api
    }

    pub fn set<F: FnOnce(&mut FakeState)>(&self, f: F) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn get<T, F: FnOnce(&FakeState) -> T>(&self, f: F) -> T {
        f(&self.state.lock().unwrap())
    }
}

fn server_error() -> ApiError {
    ApiError::Http {
        status: 500,
        message: "backend exploded".to_string(),
    }
}

#[async_trait]
impl BookmarkApi for FakeApi {
    async fn fetch_bookmarks(&self) -> Result<Vec<Bookmark>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_calls += 1;
        if state.fail_fetch {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(state.bookmarks.clone())
    }

    async fn update_bookmark(&self, edit: &BookmarkEdit) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(server_error());
        }
        state.updates.push(edit.clone());
        if let Some(b) = state.bookmarks.iter_mut().find(|b| b.id == edit.id) {
            b.title = edit.title.clone();
            b.thumbnail = edit.thumbnail.clone();
        }
        Ok(())
    }

    async fn delete_bookmark(&self, target: &BookmarkRef) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(server_error());
        }
        state.deletes.push(target.clone());
        state.bookmarks.retain(|b| b.id != target.id);
        Ok(())
    }

    async fn record_visit(&self, id: i64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(server_error());
        }
        state.visits.push(id);
        Ok(())
    }
}

#[async_trait]
impl SettingsRemote for FakeApi {
    async fn fetch_settings(&self) -> Result<DisplaySettings, ApiError> {
        let state = self.state.lock().unwrap();
        if state.fail_settings {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        state
            .remote_settings
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: "no settings stored".to_string(),
            })
    }

    async fn store_settings(&self, settings: &DisplaySettings) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_settings {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        state.stored_settings.push(*settings);
        state.remote_settings = Some(*settings);
        Ok(())
    }
}
