//! Live-feed service layer.
//!
//! The feed side of the client: the wire data model published by a scanner
//! server ([`FeedEvent`] and friends), an in-process broadcast hub
//! ([`FeedService`]) implementing the contract the UI consumes, and the
//! [`FeedSource`] seam where a transport attaches.

mod service;
mod source;
mod types;

pub use service::{FeedService, Subscription};
pub use source::{spawn_source, DemoSource, FeedSource, SourceHandle};
pub use types::{Call, FeedEvent, LivefeedMode, ScannerConfig, System, Talkgroup};
