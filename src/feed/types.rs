//! Wire data model for the live-feed service.
//!
//! Events are partial updates: every field is optional and absent fields
//! must not disturb state a subscriber already holds. Deserialization is a
//! tolerant reader: unknown fields and unrecognized mode strings are
//! dropped, never errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Live-feed mode as published by the service.
///
/// `Offline` is the default; `Online` and `Playback` are the active modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LivefeedMode {
    #[default]
    Offline,
    Online,
    Playback,
}

impl LivefeedMode {
    /// Whether the feed is in any active (non-offline) mode.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Offline
    }

    /// Parse a wire string. Unrecognized or empty strings yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "offline" => Some(Self::Offline),
            "online" => Some(Self::Online),
            "playback" => Some(Self::Playback),
            _ => None,
        }
    }
}

impl std::fmt::Display for LivefeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offline => write!(f, "OFFLINE"),
            Self::Online => write!(f, "LIVE"),
            Self::Playback => write!(f, "PLAYBACK"),
        }
    }
}

/// A talkgroup within a system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Talkgroup {
    pub id: u32,
    pub label: String,
}

/// A radio system exposed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct System {
    pub id: u32,
    pub label: String,
    pub talkgroups: Vec<Talkgroup>,
}

/// Client-facing configuration pushed by the service.
///
/// Mirrored read-only by the UI controller; `keyboard_shortcuts` gates the
/// key-driven navigation handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScannerConfig {
    pub branding: Option<String>,
    pub keyboard_shortcuts: bool,
    pub playback_goes_live: bool,
    pub show_listeners_count: bool,
    pub systems: Vec<System>,
}

/// Minimal metadata for a received call, carried by events for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: u64,
    pub system: String,
    pub talkgroup: String,
    pub received_at: DateTime<Utc>,
}

/// A partial-update event broadcast by the service.
///
/// The `config` field uses a double option: the outer level records whether
/// the field was present on the wire at all, the inner level is its value
/// (which may be an explicit null). Presence, not truthiness, governs how
/// subscribers merge it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedEvent {
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<Option<ScannerConfig>>,

    #[serde(
        deserialize_with = "lenient_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub livefeed_mode: Option<LivefeedMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<Call>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub listeners: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<usize>,
}

impl FeedEvent {
    /// Event carrying only a live-feed mode change.
    #[must_use]
    pub fn mode(mode: LivefeedMode) -> Self {
        Self {
            livefeed_mode: Some(mode),
            ..Self::default()
        }
    }

    /// Event carrying only a configuration update (possibly an explicit
    /// clear when `config` is `None`).
    #[must_use]
    pub fn config_update(config: Option<ScannerConfig>) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Event carrying only a received call.
    #[must_use]
    pub fn call(call: Call) -> Self {
        Self {
            call: Some(call),
            ..Self::default()
        }
    }
}

/// Deserialize a field whose *presence* matters: a present field (even an
/// explicit null) becomes `Some(inner)`, an absent field stays `None` via
/// `#[serde(default)]`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a mode leniently: null, empty, unrecognized, or wrong-typed
/// values all collapse to `None` so a sloppy server can never force a mode
/// reset.
fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<LivefeedMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(LivefeedMode::parse))
}
