//! Feed sources.
//!
//! A [`FeedSource`] is whatever pushes events into the [`FeedService`]: in
//! a full deployment a network transport, here the seam where one attaches.
//! The built-in [`DemoSource`] synthesizes a config and a trickle of calls
//! so the client can be exercised end-to-end without a server.

use super::service::FeedService;
use super::types::{Call, ScannerConfig, System, Talkgroup};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Something that feeds events into the service until told to stop.
pub trait FeedSource: Send {
    /// Human-readable source name, for logs.
    fn name(&self) -> &'static str;

    /// Run the source. Implementations must poll `stop` and return promptly
    /// once it flips.
    fn run(self: Box<Self>, service: FeedService, stop: Arc<AtomicBool>);
}

/// Running source thread plus its stop flag.
pub struct SourceHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SourceHandle {
    /// Signal the source to stop and wait for its thread to finish.
    pub fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("feed source thread panicked during shutdown");
            }
        }
    }
}

/// Spawn a source on a background thread.
pub fn spawn_source(source: Box<dyn FeedSource>, service: FeedService) -> SourceHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let name = source.name();
    tracing::info!("starting feed source: {name}");
    let thread = std::thread::spawn(move || source.run(service, stop_flag));
    SourceHandle {
        stop,
        thread: Some(thread),
    }
}

/// Synthetic source for offline use and demos.
///
/// Publishes a scanner configuration once at startup, then emits a call at
/// a fixed cadence whenever the feed is online.
pub struct DemoSource {
    /// Delay between synthetic calls while online.
    pub call_interval: Duration,
    /// Whether the published config enables keyboard shortcuts.
    pub keyboard_shortcuts: bool,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self {
            call_interval: Duration::from_secs(3),
            keyboard_shortcuts: true,
        }
    }
}

impl DemoSource {
    fn demo_config(&self) -> ScannerConfig {
        ScannerConfig {
            branding: Some("Airscan Demo".to_string()),
            keyboard_shortcuts: self.keyboard_shortcuts,
            playback_goes_live: false,
            show_listeners_count: true,
            systems: vec![System {
                id: 1,
                label: "Metro".to_string(),
                talkgroups: vec![
                    Talkgroup {
                        id: 101,
                        label: "Dispatch".to_string(),
                    },
                    Talkgroup {
                        id: 102,
                        label: "Fire Ops".to_string(),
                    },
                    Talkgroup {
                        id: 103,
                        label: "EMS".to_string(),
                    },
                ],
            }],
        }
    }

    fn demo_call(&self, seq: u64, config: &ScannerConfig) -> Call {
        // Rotate through the configured talkgroups; no RNG needed.
        let system = &config.systems[seq as usize % config.systems.len()];
        let talkgroup = &system.talkgroups[seq as usize % system.talkgroups.len()];
        Call {
            id: seq,
            system: system.label.clone(),
            talkgroup: talkgroup.label.clone(),
            received_at: chrono::Utc::now(),
        }
    }
}

impl FeedSource for DemoSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn run(self: Box<Self>, service: FeedService, stop: Arc<AtomicBool>) {
        let config = self.demo_config();
        service.publish_config(Some(config.clone()));

        let mut seq: u64 = 0;
        // Sleep in short slices so the stop flag is honored promptly.
        let slice = Duration::from_millis(50);
        let slices_per_call = (self.call_interval.as_millis() / slice.as_millis()).max(1) as u64;

        loop {
            for _ in 0..slices_per_call {
                if stop.load(Ordering::Relaxed) {
                    tracing::debug!("demo source stopping");
                    return;
                }
                std::thread::sleep(slice);
            }

            if service.mode().is_active() {
                seq += 1;
                let mut event = super::types::FeedEvent::call(self.demo_call(seq, &config));
                event.listeners = Some(1 + (seq % 7));
                event.queue = Some((seq % 3) as usize);
                service.publish(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedEvent;

    struct OneShotSource;

    impl FeedSource for OneShotSource {
        fn name(&self) -> &'static str {
            "one-shot"
        }

        fn run(self: Box<Self>, service: FeedService, _stop: Arc<AtomicBool>) {
            service.publish(FeedEvent::config_update(Some(ScannerConfig::default())));
        }
    }

    #[test]
    fn test_spawn_source_runs_and_shuts_down() {
        let service = FeedService::new();
        let sub = service.subscribe();

        let handle = spawn_source(Box::new(OneShotSource), service.clone());
        handle.shutdown();

        let events = sub.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].config, Some(Some(_))));
    }

    #[test]
    fn test_demo_source_publishes_config_then_stops() {
        let service = FeedService::new();
        let sub = service.subscribe();

        let handle = spawn_source(
            Box::new(DemoSource {
                call_interval: Duration::from_millis(50),
                keyboard_shortcuts: true,
            }),
            service.clone(),
        );

        // Config arrives synchronously at source startup; give the thread a
        // moment to get there.
        std::thread::sleep(Duration::from_millis(100));
        handle.shutdown();

        let events = sub.drain();
        let config = events
            .iter()
            .find_map(|e| e.config.clone())
            .expect("config published")
            .expect("non-null config");
        assert!(config.keyboard_shortcuts);
        assert!(!config.systems.is_empty());
    }

    #[test]
    fn test_demo_source_emits_calls_only_while_online() {
        let service = FeedService::new();
        let sub = service.subscribe();
        service.start_livefeed();

        let handle = spawn_source(
            Box::new(DemoSource {
                call_interval: Duration::from_millis(60),
                keyboard_shortcuts: false,
            }),
            service.clone(),
        );
        std::thread::sleep(Duration::from_millis(300));
        handle.shutdown();

        let calls = sub.drain().into_iter().filter(|e| e.call.is_some()).count();
        assert!(calls >= 1, "expected at least one synthetic call");
    }
}
