use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted polling interval in milliseconds.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// User-configurable display settings, shared by the local cache and the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Polling interval in milliseconds.
    pub refresh_interval: u64,
    pub items_per_page: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL_MS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl DisplaySettings {
    /// Builds settings from an arbitrary JSON document, field by field.
    ///
    /// Missing, non-numeric, zero or out-of-range fields take their default;
    /// valid fields are kept.
    pub fn from_json_lenient(value: &Value) -> Self {
        let defaults = Self::default();
        let refresh_interval = value
            .get("refreshInterval")
            .and_then(Value::as_u64)
            .filter(|ms| *ms >= MIN_REFRESH_INTERVAL_MS)
            .unwrap_or(defaults.refresh_interval);
        let items_per_page = value
            .get("itemsPerPage")
            .and_then(Value::as_u64)
            .filter(|n| *n >= 1)
            .map(|n| n as usize)
            .unwrap_or(defaults.items_per_page);
        Self {
            refresh_interval,
            items_per_page,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.refresh_interval >= MIN_REFRESH_INTERVAL_MS && self.items_per_page >= 1
    }
}

/// A partial settings change as submitted from the settings form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub refresh_interval: Option<u64>,
    pub items_per_page: Option<usize>,
}

impl SettingsUpdate {
    /// Form input takes the refresh interval in seconds.
    pub fn from_form(items_per_page: Option<usize>, refresh_secs: Option<u64>) -> Self {
        Self {
            refresh_interval: refresh_secs.map(|s| s.saturating_mul(1000)),
            items_per_page,
        }
    }
}
