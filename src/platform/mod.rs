// linkshelf platform paths
// Resolves per-user directories through the `dirs` crate:
//
// - Linux:   $XDG_CONFIG_HOME/linkshelf or ~/.config/linkshelf
// - macOS:   ~/Library/Application Support/linkshelf
// - Windows: %APPDATA%/linkshelf

use std::path::PathBuf;

const APP_DIR: &str = "linkshelf";
const SETTINGS_FILE: &str = "settings.json";

/// Returns the per-user configuration directory for linkshelf.
///
/// Falls back to `./linkshelf` when the platform reports no config directory.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the local display-settings cache.
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE)
}
