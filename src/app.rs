//! App context for linkshelf.
//!
//! Central struct holding the injected services and managers, replacing
//! module-level singletons. Drives startup, polling and settings changes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::managers::bookmark_board::{BoardView, BookmarkBoard};
use crate::services::api_client::{ApiClient, BookmarkApi, SettingsRemote};
use crate::services::notifier::Notifier;
use crate::services::poller::Poller;
use crate::services::settings_store::SettingsStore;
use crate::types::errors::{ApiError, SettingsError};
use crate::types::settings::{DisplaySettings, SettingsUpdate};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection and storage options for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    /// Overrides the platform location of the settings cache.
    pub settings_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            settings_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Application context holding every service.
pub struct App<A = ApiClient>
where
    A: BookmarkApi + SettingsRemote + 'static,
{
    pub api: Arc<A>,
    pub notifier: Notifier,
    pub settings: SettingsStore<A>,
    pub board: Arc<BookmarkBoard<A>>,
    poller: Option<Poller>,
}

impl App<ApiClient> {
    /// Creates an app talking to the configured backend over HTTP.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_url, config.timeout)?;
        Ok(Self::with_api(Arc::new(api), config.settings_path.clone()))
    }
}

impl<A> App<A>
where
    A: BookmarkApi + SettingsRemote + 'static,
{
    /// Wires the services around an existing backend implementation.
    pub fn with_api(api: Arc<A>, settings_path: Option<PathBuf>) -> Self {
        let notifier = Notifier::new();
        let settings = SettingsStore::new(api.clone(), settings_path);
        let board = Arc::new(BookmarkBoard::new(
            api.clone(),
            notifier.clone(),
            settings.subscribe(),
        ));
        Self {
            api,
            notifier,
            settings,
            board,
            poller: None,
        }
    }

    /// Startup sequence: load settings (remote, local cache, defaults).
    pub async fn startup(&self) -> DisplaySettings {
        let settings = self.settings.load().await;
        tracing::info!(
            refresh_interval_ms = settings.refresh_interval,
            items_per_page = settings.items_per_page,
            "settings loaded"
        );
        settings
    }

    /// Moves the board to `page`, warning when it had to be clamped.
    ///
    /// Returns the page reached.
    pub fn request_page(&self, page: i64) -> usize {
        let landed = self.board.go_to_page(page);
        if landed as i64 != page {
            self.notifier.warning(format!(
                "Page {} does not exist, showing page {}",
                page, landed
            ));
        }
        landed
    }

    /// Starts polling the backend; `on_refresh` receives the rendered view after each fetch.
    ///
    /// Replaces any previous polling loop.
    pub fn start_polling<F>(&mut self, on_refresh: F)
    where
        F: Fn(&BoardView) + Send + Sync + 'static,
    {
        if let Some(mut previous) = self.poller.take() {
            previous.stop();
        }

        let board = self.board.clone();
        let on_refresh = Arc::new(on_refresh);
        let mut poller = Poller::new(move || {
            let board = board.clone();
            let on_refresh = on_refresh.clone();
            async move {
                // Failures are already surfaced as notifications; keep showing the last list.
                let _ = board.refresh().await;
                (*on_refresh)(&board.view());
            }
        });
        poller.start(self.refresh_interval());
        self.poller = Some(poller);
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(Poller::is_running)
    }

    /// Interval the poller uses, taken from the current settings.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.settings.current().refresh_interval)
    }

    /// Applies a settings change and restarts polling with the new interval.
    pub async fn apply_settings(&mut self, update: SettingsUpdate) -> Result<bool, SettingsError> {
        match self.settings.update(update).await {
            Ok(true) => {
                let interval = self.refresh_interval();
                if let Some(poller) = self.poller.as_mut() {
                    if poller.is_running() {
                        poller.start(interval);
                    }
                }
                self.notifier.success("Settings saved successfully");
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                tracing::error!(error = %e, "error applying settings");
                self.notifier.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Shutdown sequence: stop polling.
    pub fn shutdown(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }
}
