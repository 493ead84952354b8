//! Configuration file loading and discovery.

use super::types::AppConfig;
use crate::error::{AirscanError, ConfigErrorKind, Result};
use std::path::{Path, PathBuf};

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".airscan.yaml", ".airscan.yml", "airscan.yaml", "airscan.yml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/airscan/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("airscan")) {
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_config_in_dir(&home) {
            return Some(path);
        }
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load configuration from a specific file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(AirscanError::config(
            "loading config file",
            ConfigErrorKind::NotFound(path.to_path_buf()),
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| AirscanError::io(path, e))?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when no file is found.
///
/// Returns the config together with the path it was loaded from (if any).
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    match discover_config_file(explicit_path) {
        Some(path) => match load_config(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("failed to load {}: {e}; using defaults", path.display());
                (AppConfig::default(), None)
            }
        },
        None => (AppConfig::default(), None),
    }
}

/// Generate a commented example configuration for `config init`.
#[must_use]
pub fn generate_example_config() -> String {
    let example = r"# airscan configuration
#
# All settings are optional; absent keys use built-in defaults.

ui:
  # Tick cadence in milliseconds (drives redraw and event pumping)
  tick_rate_ms: 100
  # Number of calls retained in the history view
  history_limit: 200

demo:
  # Seconds between synthetic calls while the feed is online
  call_interval_secs: 3
  # Whether the demo scanner config enables keyboard shortcuts
  keyboard_shortcuts: true
";
    example.to_string()
}
