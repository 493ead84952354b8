//! Local client configuration.
//!
//! This is airscan's own configuration (terminal preferences, demo source
//! settings), loaded from a YAML file. It is distinct from the
//! service-pushed [`ScannerConfig`](crate::feed::ScannerConfig), which
//! reaches the UI only through the event stream.

mod defaults;
mod file;
mod types;

pub use file::{discover_config_file, generate_example_config, load_config, load_or_default};
pub use types::{AppConfig, DemoConfig, UiConfig};

/// Generate a JSON Schema for the config file format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
