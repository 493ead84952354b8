//! Terminal event pump and key dispatch for the listen screen.

use super::app::ListenApp;
use super::controller::KeyDisposition;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
pub enum TermEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Event handler: polls crossterm on a background thread and forwards
/// key/resize events, emitting a tick when the terminal is quiet.
pub struct EventPump {
    rx: mpsc::Receiver<TermEvent>,
    _tx: mpsc::Sender<TermEvent>,
}

impl EventPump {
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let event_tx = tx.clone();
        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(TermEvent::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(TermEvent::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(TermEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Next terminal event; blocks until a key arrives or a tick elapses.
    pub fn next(&self) -> io::Result<TermEvent> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Handle a key event for the listen screen.
///
/// The three gated gestures go through the controller first; a `Pass`
/// disposition falls back to the default behavior below (history scrolling
/// for the arrows, focus cycling for Tab).
pub(crate) fn handle_key_event(app: &mut ListenApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Exit-confirmation overlay swallows everything else
    if app.confirm_pending() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => app.dismiss_quit(),
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Left => {
            if app.controller_mut().key_left_arrow(Some(&key)) == KeyDisposition::Pass {
                app.scroll_history_left();
            }
        }
        KeyCode::Right => {
            if app.controller_mut().key_right_arrow(Some(&key)) == KeyDisposition::Pass {
                app.scroll_history_right();
            }
        }
        KeyCode::Tab => {
            if app.controller_mut().toggle_fullscreen(Some(&key)) == KeyDisposition::Pass {
                app.focus_next();
            }
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            let _ = app.controller_mut().toggle_fullscreen(Some(&key));
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('s') => app.controller_mut().start(),
        KeyCode::Char('x') => app.controller_mut().stop(),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedService, LivefeedMode, ScannerConfig};
    use crate::ui::app::ListenApp;
    use crate::ui::controller::ScannerController;
    use crate::ui::fullscreen::FullscreenShim;

    fn app_with_shortcuts(enabled: bool) -> (FeedService, ListenApp) {
        let service = FeedService::new();
        let controller =
            ScannerController::with_fullscreen(service.clone(), FullscreenShim::new(Vec::new()));
        let mut app = ListenApp::new(controller, 50);
        service.publish_config(Some(ScannerConfig {
            keyboard_shortcuts: enabled,
            ..ScannerConfig::default()
        }));
        app.controller_mut().pump_events();
        (service, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_left_arrow_opens_search_when_enabled() {
        let (_service, mut app) = app_with_shortcuts(true);
        handle_key_event(&mut app, press(KeyCode::Left));
        assert!(app.controller().search_panel().opened());
    }

    #[test]
    fn test_left_arrow_falls_back_when_disabled() {
        let (_service, mut app) = app_with_shortcuts(false);
        handle_key_event(&mut app, press(KeyCode::Left));
        assert!(
            !app.controller().search_panel().opened(),
            "gated gesture must not act"
        );
    }

    #[test]
    fn test_quit_key_sets_quit_when_offline() {
        let (_service, mut app) = app_with_shortcuts(true);
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_key_prompts_while_online() {
        let (service, mut app) = app_with_shortcuts(true);
        service.start_livefeed();
        app.controller_mut().pump_events();
        assert_eq!(app.controller().livefeed_mode(), LivefeedMode::Online);

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert!(app.confirm_pending());

        handle_key_event(&mut app, press(KeyCode::Char('y')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_prompt_can_be_dismissed() {
        let (service, mut app) = app_with_shortcuts(true);
        service.start_livefeed();
        app.controller_mut().pump_events();

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        handle_key_event(&mut app, press(KeyCode::Char('n')));
        assert!(!app.should_quit());
        assert!(!app.confirm_pending());
    }

    #[test]
    fn test_start_stop_keys_reach_service() {
        let (service, mut app) = app_with_shortcuts(true);
        handle_key_event(&mut app, press(KeyCode::Char('s')));
        assert_eq!(service.mode(), LivefeedMode::Online);
        handle_key_event(&mut app, press(KeyCode::Char('x')));
        assert_eq!(service.mode(), LivefeedMode::Offline);
    }
}
