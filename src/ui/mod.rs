//! Terminal user interface.
//!
//! The heart of this module is [`ScannerController`], the root interaction
//! controller: it mirrors service-published state and maps key gestures to
//! panel, fullscreen, and feed actions. The rest is the host it lives in:
//! panel handles, the capability-probed fullscreen shim, the terminal event
//! pump, and the ratatui listen screen.

mod app;
mod controller;
mod events;
mod fullscreen;
mod panels;

pub use app::ListenApp;
pub use controller::{KeyDisposition, ScannerController, EXIT_PROMPT};
pub use events::{EventPump, TermEvent};
pub use fullscreen::{default_drivers, FullscreenDriver, FullscreenShim};
pub use panels::{Panel, PanelId};
