//! **airscan** is a terminal listening client for radio-scanner feeds.
//!
//! The crate centers on one component: the root interaction controller
//! ([`ui::ScannerController`]). It keeps a read-only mirror of two pieces of
//! state the live-feed service publishes over its event stream (the scanner
//! configuration and the live-feed mode) and maps gestures onto local UI
//! actions and service commands:
//!
//! - arrow keys open and close the search/select side panels, gated by the
//!   service-supplied `keyboard_shortcuts` flag;
//! - `f`/Tab toggle fullscreen through an ordered capability probe over
//!   terminal-specific mechanisms ([`ui::FullscreenShim`]);
//! - quit requests are held back behind a confirmation while the feed is
//!   active ([`ui::ScannerController::exit_guard`]).
//!
//! ## Modules
//!
//! - [`feed`]: the wire data model ([`feed::FeedEvent`] partial updates with
//!   presence-based merging), the in-process broadcast hub
//!   ([`feed::FeedService`]), and the [`feed::FeedSource`] seam where a
//!   transport attaches (a synthetic [`feed::DemoSource`] is built in).
//! - [`ui`]: the controller and the ratatui listen screen that hosts it.
//! - [`config`]: the client's own YAML configuration (distinct from the
//!   service-pushed [`feed::ScannerConfig`]).
//! - [`error`]: the `thiserror`-based error hierarchy.
//!
//! ## Example: driving the controller without a terminal
//!
//! ```
//! use airscan::feed::{FeedService, LivefeedMode};
//! use airscan::ui::{FullscreenShim, ScannerController};
//!
//! let service = FeedService::new();
//! let mut controller =
//!     ScannerController::with_fullscreen(service.clone(), FullscreenShim::new(Vec::new()));
//!
//! service.start_livefeed();
//! controller.pump_events();
//! assert_eq!(controller.livefeed_mode(), LivefeedMode::Online);
//! assert!(controller.exit_guard().is_some());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod ui;

pub use error::{AirscanError, Result};
