//! Configuration types for the airscan client.

use super::defaults;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level local configuration, loaded from `.airscan.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Terminal UI preferences
    pub ui: UiConfig,
    /// Demo source settings
    pub demo: DemoConfig,
}

/// Terminal UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UiConfig {
    /// Tick cadence in milliseconds (drives redraw and event pumping)
    pub tick_rate_ms: u64,
    /// Number of calls retained in the history view
    pub history_limit: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: defaults::DEFAULT_TICK_RATE_MS,
            history_limit: defaults::DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Settings for the built-in demo source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DemoConfig {
    /// Seconds between synthetic calls while the feed is online
    pub call_interval_secs: u64,
    /// Whether the demo's published scanner config enables keyboard shortcuts
    pub keyboard_shortcuts: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            call_interval_secs: defaults::DEFAULT_DEMO_CALL_INTERVAL_SECS,
            keyboard_shortcuts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = AppConfig::default();
        assert!(config.ui.tick_rate_ms > 0);
        assert!(config.ui.history_limit > 0);
        assert!(config.demo.keyboard_shortcuts);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("ui:\n  tick_rate_ms: 50\n").expect("parse partial config");
        assert_eq!(config.ui.tick_rate_ms, 50);
        assert_eq!(
            config.ui.history_limit,
            super::defaults::DEFAULT_HISTORY_LIMIT
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).expect("serialize");
        let back: AppConfig = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(config, back);
    }
}
