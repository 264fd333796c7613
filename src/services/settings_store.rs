// linkshelf Settings Store
// Holds display settings (refresh interval, items per page).
// Loads from the backend first, then the local JSON cache, then defaults.
// Updates are validated, cached locally, pushed to the backend best-effort and
// broadcast to dependents through a watch channel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::platform;
use crate::services::api_client::SettingsRemote;
use crate::types::errors::SettingsError;
use crate::types::settings::{DisplaySettings, SettingsUpdate, MIN_REFRESH_INTERVAL_MS};

/// Settings store backed by a remote endpoint and a local JSON cache file.
pub struct SettingsStore<R: SettingsRemote> {
    cache_path: PathBuf,
    remote: Arc<R>,
    state: watch::Sender<DisplaySettings>,
}

impl<R: SettingsRemote> SettingsStore<R> {
    /// Creates a store starting from defaults.
    ///
    /// If `path_override` is `None`, the cache lives in the platform config directory.
    pub fn new(remote: Arc<R>, path_override: Option<PathBuf>) -> Self {
        let cache_path = path_override.unwrap_or_else(platform::default_settings_path);
        let (state, _) = watch::channel(DisplaySettings::default());
        Self {
            cache_path,
            remote,
            state,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Current in-memory settings.
    pub fn current(&self) -> DisplaySettings {
        *self.state.borrow()
    }

    /// Receiver that observes every applied settings change.
    pub fn subscribe(&self) -> watch::Receiver<DisplaySettings> {
        self.state.subscribe()
    }

    /// Loads settings: remote, then local cache, then defaults. Never fails.
    ///
    /// A successful remote load refreshes the local cache.
    pub async fn load(&self) -> DisplaySettings {
        let settings = match self.remote.fetch_settings().await {
            Ok(remote) => {
                if let Err(e) = self.save_local(&remote) {
                    tracing::warn!(error = %e, "failed to refresh local settings cache");
                }
                remote
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote settings unavailable, using local cache");
                match self.load_local() {
                    Ok(Some(local)) => local,
                    Ok(None) => DisplaySettings::default(),
                    Err(e) => {
                        tracing::warn!(error = %e, "local settings unreadable, using defaults");
                        DisplaySettings::default()
                    }
                }
            }
        };
        self.state.send_replace(settings);
        settings
    }

    /// Reads the local cache. `Ok(None)` when no cache file exists.
    pub fn load_local(&self) -> Result<Option<DisplaySettings>, SettingsError> {
        if !self.cache_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.cache_path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read settings cache: {}", e)))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse settings cache: {}", e))
        })?;
        if !value.is_object() {
            return Err(SettingsError::SerializationError(
                "Settings cache is not a JSON object".to_string(),
            ));
        }
        Ok(Some(DisplaySettings::from_json_lenient(&value)))
    }

    /// Writes the local cache, creating parent directories as needed.
    pub fn save_local(&self, settings: &DisplaySettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create settings directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        fs::write(&self.cache_path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write settings cache: {}", e)))
    }

    /// Validates and applies a partial update. Returns whether anything changed.
    ///
    /// The local cache is written even when the backend rejects the update.
    pub async fn update(&self, update: SettingsUpdate) -> Result<bool, SettingsError> {
        let next = merge(self.current(), update)?;
        if next == self.current() {
            return Ok(false);
        }

        if let Err(e) = self.save_local(&next) {
            tracing::error!(error = %e, "failed to write local settings cache");
        }
        if let Err(e) = self.remote.store_settings(&next).await {
            tracing::warn!(error = %e, "failed to store settings remotely");
        }

        self.state.send_replace(next);
        tracing::info!(
            refresh_interval_ms = next.refresh_interval,
            items_per_page = next.items_per_page,
            "settings updated"
        );
        Ok(true)
    }

    /// Restores defaults through the normal update path.
    pub async fn reset(&self) -> Result<bool, SettingsError> {
        let defaults = DisplaySettings::default();
        self.update(SettingsUpdate {
            refresh_interval: Some(defaults.refresh_interval),
            items_per_page: Some(defaults.items_per_page),
        })
        .await
    }
}

/// Applies `update` on top of `current`, rejecting out-of-range values.
pub fn merge(
    current: DisplaySettings,
    update: SettingsUpdate,
) -> Result<DisplaySettings, SettingsError> {
    let mut next = current;
    if let Some(ms) = update.refresh_interval {
        if ms < MIN_REFRESH_INTERVAL_MS {
            return Err(SettingsError::InvalidValue(format!(
                "refresh interval must be at least {} seconds",
                MIN_REFRESH_INTERVAL_MS / 1000
            )));
        }
        next.refresh_interval = ms;
    }
    if let Some(n) = update.items_per_page {
        if n == 0 {
            return Err(SettingsError::InvalidValue(
                "items per page must be at least 1".to_string(),
            ));
        }
        next.items_per_page = n;
    }
    Ok(next)
}
