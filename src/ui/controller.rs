//! Root interaction controller.
//!
//! Mirrors two pieces of service-published state (scanner configuration and
//! live-feed mode) from the event stream and maps key gestures, quit
//! requests, and feed commands onto the panels, the fullscreen shim, and
//! the service. Mirrored state is mutated only while draining events; every
//! other handler just reads it.

use super::fullscreen::FullscreenShim;
use super::panels::{Panel, PanelId};
use crate::feed::{FeedEvent, FeedService, LivefeedMode, ScannerConfig, Subscription};
use crossterm::event::KeyEvent;

/// Prompt shown when quitting while the feed is active.
pub const EXIT_PROMPT: &str = "Live feed is ON, do you really want to leave?";

/// What a key handler did with a key.
///
/// `Pass` means the handler declined it (gate closed) and the host should
/// apply its default behavior; `Handled` means the default is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum KeyDisposition {
    Handled,
    Pass,
}

/// Root controller for the listen screen.
pub struct ScannerController {
    service: FeedService,
    subscription: Option<Subscription>,
    config: Option<ScannerConfig>,
    livefeed_mode: LivefeedMode,
    search_panel: Panel,
    select_panel: Panel,
    fullscreen: FullscreenShim,
}

impl ScannerController {
    /// Create a controller and subscribe to the service immediately.
    #[must_use]
    pub fn new(service: FeedService) -> Self {
        Self::with_fullscreen(service, FullscreenShim::with_default_drivers())
    }

    /// Like [`Self::new`] with an explicit fullscreen shim (used by hosts
    /// and tests that control the driver list).
    #[must_use]
    pub fn with_fullscreen(service: FeedService, fullscreen: FullscreenShim) -> Self {
        let subscription = service.subscribe();
        Self {
            service,
            subscription: Some(subscription),
            config: None,
            livefeed_mode: LivefeedMode::default(),
            search_panel: Panel::new(PanelId::Search),
            select_panel: Panel::new(PanelId::Select),
            fullscreen,
        }
    }

    // ------------------------------------------------------------------
    // State synchronization
    // ------------------------------------------------------------------

    /// Drain pending service events in arrival order and merge them into
    /// the mirrored state. Returns the drained events so the host can pick
    /// up display-only fields (calls, listeners, queue).
    pub fn pump_events(&mut self) -> Vec<FeedEvent> {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => Vec::new(),
        };
        for event in &events {
            self.apply_event(event);
        }
        events
    }

    /// Presence-based monotone merge: a present `config` field replaces the
    /// mirror even when explicitly null; an absent mode leaves the
    /// last-known mode alone.
    fn apply_event(&mut self, event: &FeedEvent) {
        if let Some(config) = &event.config {
            self.config = config.clone();
        }
        if let Some(mode) = event.livefeed_mode {
            self.livefeed_mode = mode;
        }
    }

    /// Mirrored scanner configuration, if any has been received.
    #[must_use]
    pub fn config(&self) -> Option<&ScannerConfig> {
        self.config.as_ref()
    }

    /// Mirrored live-feed mode.
    #[must_use]
    pub fn livefeed_mode(&self) -> LivefeedMode {
        self.livefeed_mode
    }

    // ------------------------------------------------------------------
    // Exit guard
    // ------------------------------------------------------------------

    /// Confirmation prompt to show before quitting, or `None` when leaving
    /// is fine.
    #[must_use]
    pub fn exit_guard(&self) -> Option<&'static str> {
        if self.livefeed_mode.is_active() {
            Some(EXIT_PROMPT)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Live-feed control
    // ------------------------------------------------------------------

    /// Ask the service to start the feed. The mode mirror is updated by the
    /// event stream, never assumed here.
    pub fn start(&self) {
        self.service.start_livefeed();
    }

    /// Ask the service to stop the feed and fold both panels away.
    pub fn stop(&mut self) {
        self.service.stop_livefeed();
        self.search_panel.close();
        self.select_panel.close();
    }

    // ------------------------------------------------------------------
    // Keyboard-gated navigation
    // ------------------------------------------------------------------

    /// Shortcut gate: real key events act only once a configuration with
    /// `keyboard_shortcuts` enabled has been mirrored.
    fn shortcuts_enabled(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| config.keyboard_shortcuts)
    }

    /// Left arrow: close the select panel if open, otherwise open search.
    pub fn key_left_arrow(&mut self, event: Option<&KeyEvent>) -> KeyDisposition {
        if event.is_some() && !self.shortcuts_enabled() {
            return KeyDisposition::Pass;
        }

        if self.select_panel.opened() {
            self.select_panel.close();
        } else {
            self.search_panel.open();
        }
        KeyDisposition::Handled
    }

    /// Right arrow: close the search panel if open, otherwise open select.
    pub fn key_right_arrow(&mut self, event: Option<&KeyEvent>) -> KeyDisposition {
        if event.is_some() && !self.shortcuts_enabled() {
            return KeyDisposition::Pass;
        }

        if self.search_panel.opened() {
            self.search_panel.close();
        } else {
            self.select_panel.open();
        }
        KeyDisposition::Handled
    }

    /// Fullscreen toggle (`f` / `Tab`). The probe itself degrades to a
    /// no-op when no driver is available; the gate only applies to real
    /// key events.
    pub fn toggle_fullscreen(&mut self, event: Option<&KeyEvent>) -> KeyDisposition {
        if event.is_some() && !self.shortcuts_enabled() {
            return KeyDisposition::Pass;
        }

        self.fullscreen.toggle();
        KeyDisposition::Handled
    }

    // ------------------------------------------------------------------
    // Panels
    // ------------------------------------------------------------------

    #[must_use]
    pub fn search_panel(&self) -> &Panel {
        &self.search_panel
    }

    pub fn search_panel_mut(&mut self) -> &mut Panel {
        &mut self.search_panel
    }

    #[must_use]
    pub fn select_panel(&self) -> &Panel {
        &self.select_panel
    }

    pub fn select_panel_mut(&mut self) -> &mut Panel {
        &mut self.select_panel
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Cancel the event subscription. Calling this more than once is a
    /// no-op.
    pub fn shutdown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

impl Drop for ScannerController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
