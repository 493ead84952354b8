//! Listen screen.
//!
//! Hosts the [`ScannerController`] in a ratatui terminal: draws the status
//! bar, call history, the two side-panel drawers, and the exit-confirmation
//! overlay, and routes terminal events into the controller.

use super::controller::ScannerController;
use super::events::{handle_key_event, EventPump, TermEvent};
use crate::feed::{Call, FeedEvent, LivefeedMode};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Which pane Up/Down and default Tab cycling act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusPane {
    History,
    Search,
    Select,
}

impl FocusPane {
    fn next(self) -> Self {
        match self {
            Self::History => Self::Search,
            Self::Search => Self::Select,
            Self::Select => Self::History,
        }
    }
}

/// The listen screen: controller plus display-only state.
pub struct ListenApp {
    controller: ScannerController,
    history: VecDeque<Call>,
    history_limit: usize,
    history_selected: usize,
    history_hscroll: u16,
    listeners: Option<u64>,
    queue: Option<usize>,
    focus: FocusPane,
    confirm_exit: Option<&'static str>,
    should_quit: bool,
}

impl ListenApp {
    #[must_use]
    pub fn new(controller: ScannerController, history_limit: usize) -> Self {
        Self {
            controller,
            history: VecDeque::new(),
            history_limit,
            history_selected: 0,
            history_hscroll: 0,
            listeners: None,
            queue: None,
            focus: FocusPane::History,
            confirm_exit: None,
            should_quit: false,
        }
    }

    /// Run the screen until the user quits. Sets up and restores the
    /// terminal around the draw loop.
    pub fn run(mut self, tick_rate: Duration) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let pump = EventPump::new(tick_rate);
        let result = self.event_loop(&mut terminal, &pump);

        // Always restore the terminal, even when the loop errored.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        self.controller.shutdown();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        pump: &EventPump,
    ) -> anyhow::Result<()> {
        loop {
            let events = self.controller.pump_events();
            self.absorb_events(events);

            terminal.draw(|frame| self.draw(frame))?;

            match pump.next()? {
                TermEvent::Key(key) => handle_key_event(self, key),
                TermEvent::Resize(_, _) | TermEvent::Tick => {}
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Fold display-only event fields into the screen state. The mirrored
    /// config/mode merge already happened inside the controller.
    pub fn absorb_events(&mut self, events: Vec<FeedEvent>) {
        for event in events {
            if let Some(call) = event.call {
                if self.history.len() >= self.history_limit {
                    self.history.pop_back();
                }
                self.history.push_front(call);
            }
            if let Some(listeners) = event.listeners {
                self.listeners = Some(listeners);
            }
            if let Some(queue) = event.queue {
                self.queue = Some(queue);
            }
        }
    }

    // ------------------------------------------------------------------
    // Quit flow
    // ------------------------------------------------------------------

    /// Ask to leave; the controller's exit guard may demand confirmation.
    pub(crate) fn request_quit(&mut self) {
        match self.controller.exit_guard() {
            Some(prompt) => self.confirm_exit = Some(prompt),
            None => self.should_quit = true,
        }
    }

    pub(crate) fn confirm_quit(&mut self) {
        self.confirm_exit = None;
        self.should_quit = true;
    }

    pub(crate) fn dismiss_quit(&mut self) {
        self.confirm_exit = None;
    }

    #[must_use]
    pub fn confirm_pending(&self) -> bool {
        self.confirm_exit.is_some()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Default key behaviors (applied when the shortcut gate passes a key
    // back to the host)
    // ------------------------------------------------------------------

    pub(crate) fn scroll_history_left(&mut self) {
        self.history_hscroll = self.history_hscroll.saturating_sub(4);
    }

    pub(crate) fn scroll_history_right(&mut self) {
        self.history_hscroll = self.history_hscroll.saturating_add(4);
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn select_prev(&mut self) {
        match self.focus {
            FocusPane::History => self.history_selected = self.history_selected.saturating_sub(1),
            FocusPane::Search => self.controller.search_panel_mut().select_prev(),
            FocusPane::Select => self.controller.select_panel_mut().select_prev(),
        }
    }

    pub(crate) fn select_next(&mut self) {
        match self.focus {
            FocusPane::History => {
                if self.history_selected + 1 < self.history.len() {
                    self.history_selected += 1;
                }
            }
            FocusPane::Search => {
                let len = self.history.len();
                self.controller.search_panel_mut().select_next(len);
            }
            FocusPane::Select => {
                let len = self.talkgroup_labels().len();
                self.controller.select_panel_mut().select_next(len);
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn controller(&self) -> &ScannerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScannerController {
        &mut self.controller
    }

    /// Flattened "system / talkgroup" labels from the mirrored config.
    fn talkgroup_labels(&self) -> Vec<String> {
        let Some(config) = self.controller.config() else {
            return Vec::new();
        };
        let mut labels = Vec::new();
        for system in &config.systems {
            for talkgroup in &system.talkgroups {
                labels.push(format!("{} / {}", system.label, talkgroup.label));
            }
        }
        labels
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.draw_status(frame, chunks[0]);
        self.draw_history(frame, chunks[1]);
        self.draw_help(frame, chunks[2]);

        if self.controller.search_panel().opened() {
            self.draw_search_panel(frame, chunks[1]);
        }
        if self.controller.select_panel().opened() {
            self.draw_select_panel(frame, chunks[1]);
        }
        if let Some(prompt) = self.confirm_exit {
            draw_confirm_overlay(frame, prompt);
        }
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let mode = self.controller.livefeed_mode();
        let mode_style = match mode {
            LivefeedMode::Offline => Style::default().fg(Color::DarkGray),
            LivefeedMode::Online => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            LivefeedMode::Playback => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        };

        let mut spans = vec![Span::styled(format!(" {mode} "), mode_style)];
        if let Some(queue) = self.queue {
            spans.push(Span::raw(format!("  queue: {queue}")));
        }
        let show_listeners = self
            .controller
            .config()
            .is_some_and(|config| config.show_listeners_count);
        if show_listeners {
            if let Some(listeners) = self.listeners {
                spans.push(Span::raw(format!("  listeners: {listeners}")));
            }
        }

        let title = self
            .controller
            .config()
            .and_then(|config| config.branding.clone())
            .unwrap_or_else(|| "airscan".to_string());

        let status = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(status, area);
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|call| {
                let when = call.received_at.format("%H:%M:%S");
                let line = format!("{when}  {} / {}", call.system, call.talkgroup);
                // Manual horizontal scroll: List has none of its own.
                let visible: String = line.chars().skip(self.history_hscroll as usize).collect();
                ListItem::new(Line::from(visible))
            })
            .collect();

        let mut state = ListState::default();
        if !self.history.is_empty() {
            state.select(Some(self.history_selected.min(self.history.len() - 1)));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Calls"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new(Line::from(
            " s start  x stop  \u{2190}/\u{2192} panels  f/Tab fullscreen  q quit",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, area);
    }

    fn draw_search_panel(&self, frame: &mut Frame, area: Rect) {
        let drawer = side_drawer(area, true);
        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|call| ListItem::new(format!("{} / {}", call.system, call.talkgroup)))
            .collect();
        let mut state = ListState::default();
        if !self.history.is_empty() {
            state.select(Some(
                self.controller
                    .search_panel()
                    .selected()
                    .min(self.history.len() - 1),
            ));
        }

        frame.render_widget(Clear, drawer);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.controller.search_panel().id().title()),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, drawer, &mut state);
    }

    fn draw_select_panel(&self, frame: &mut Frame, area: Rect) {
        let drawer = side_drawer(area, false);
        let labels = self.talkgroup_labels();
        let items: Vec<ListItem> = labels.iter().map(|l| ListItem::new(l.clone())).collect();
        let mut state = ListState::default();
        if !labels.is_empty() {
            state.select(Some(
                self.controller
                    .select_panel()
                    .selected()
                    .min(labels.len() - 1),
            ));
        }

        frame.render_widget(Clear, drawer);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.controller.select_panel().id().title()),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, drawer, &mut state);
    }
}

/// Drawer rect hugging the left or right edge of `area`.
fn side_drawer(area: Rect, left: bool) -> Rect {
    let width = (area.width * 2 / 5).max(20).min(area.width);
    let x = if left {
        area.x
    } else {
        area.x + area.width - width
    };
    Rect::new(x, area.y, width, area.height)
}

/// Centered confirmation box with the exit prompt.
fn draw_confirm_overlay(frame: &mut Frame, prompt: &str) {
    let area = frame.area();
    let width = (prompt.len() as u16 + 6).min(area.width);
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height / 2,
        width,
        4,
    )
    .intersection(area);

    frame.render_widget(Clear, rect);
    let body = Paragraph::new(vec![
        Line::from(prompt.to_string()),
        Line::from(Span::styled(
            "y: leave   n: stay",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Confirm"));
    frame.render_widget(body, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedService, ScannerConfig};
    use crate::ui::fullscreen::FullscreenShim;

    fn app() -> (FeedService, ListenApp) {
        let service = FeedService::new();
        let controller =
            ScannerController::with_fullscreen(service.clone(), FullscreenShim::new(Vec::new()));
        (service, ListenApp::new(controller, 3))
    }

    fn call(id: u64) -> Call {
        Call {
            id,
            system: "Metro".to_string(),
            talkgroup: format!("TG {id}"),
            received_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_history_is_bounded_and_newest_first() {
        let (_service, mut app) = app();
        for id in 0..5 {
            app.absorb_events(vec![FeedEvent::call(call(id))]);
        }
        assert_eq!(app.history.len(), 3);
        assert_eq!(app.history.front().expect("non-empty").id, 4);
    }

    #[test]
    fn test_absorb_keeps_latest_counters() {
        let (_service, mut app) = app();
        app.absorb_events(vec![
            FeedEvent {
                listeners: Some(2),
                queue: Some(1),
                ..FeedEvent::default()
            },
            FeedEvent {
                listeners: Some(5),
                ..FeedEvent::default()
            },
        ]);
        assert_eq!(app.listeners, Some(5));
        assert_eq!(app.queue, Some(1));
    }

    #[test]
    fn test_request_quit_offline_quits_directly() {
        let (_service, mut app) = app();
        app.request_quit();
        assert!(app.should_quit());
        assert!(!app.confirm_pending());
    }

    #[test]
    fn test_request_quit_online_asks_first() {
        let (service, mut app) = app();
        service.start_livefeed();
        app.controller_mut().pump_events();

        app.request_quit();
        assert!(!app.should_quit());
        assert!(app.confirm_pending());

        app.dismiss_quit();
        assert!(!app.confirm_pending());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_talkgroup_labels_follow_mirrored_config() {
        let (service, mut app) = app();
        assert!(app.talkgroup_labels().is_empty());

        service.publish_config(Some(ScannerConfig {
            systems: vec![crate::feed::System {
                id: 1,
                label: "Metro".to_string(),
                talkgroups: vec![crate::feed::Talkgroup {
                    id: 101,
                    label: "Dispatch".to_string(),
                }],
            }],
            ..ScannerConfig::default()
        }));
        app.controller_mut().pump_events();

        assert_eq!(app.talkgroup_labels(), vec!["Metro / Dispatch".to_string()]);
    }

    #[test]
    fn test_side_drawer_edges() {
        let area = Rect::new(0, 0, 100, 30);
        let left = side_drawer(area, true);
        let right = side_drawer(area, false);
        assert_eq!(left.x, 0);
        assert_eq!(right.x + right.width, 100);
    }
}
