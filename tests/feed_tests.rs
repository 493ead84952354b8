//! Integration tests for the feed layer.

use airscan::feed::{Call, FeedEvent, FeedService, LivefeedMode, ScannerConfig};

// ============================================================================
// Broadcast hub
// ============================================================================

#[test]
fn test_two_subscribers_both_receive_in_order() {
    let service = FeedService::new();
    let first = service.subscribe();
    let second = service.subscribe();

    service.start_livefeed();
    service.publish(FeedEvent {
        queue: Some(1),
        ..FeedEvent::default()
    });
    service.stop_livefeed();

    for sub in [&first, &second] {
        let events = sub.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].livefeed_mode, Some(LivefeedMode::Online));
        assert_eq!(events[1].queue, Some(1));
        assert_eq!(events[2].livefeed_mode, Some(LivefeedMode::Offline));
    }
}

#[test]
fn test_cancelled_subscriber_does_not_block_others() {
    let service = FeedService::new();
    let mut cancelled = service.subscribe();
    let live = service.subscribe();

    cancelled.cancel();
    service.start_livefeed();

    assert!(cancelled.try_recv().is_none());
    assert_eq!(live.drain().len(), 1);
}

#[test]
fn test_publish_from_background_thread_preserves_order() {
    let service = FeedService::new();
    let sub = service.subscribe();

    let publisher = service.clone();
    let handle = std::thread::spawn(move || {
        for queue in 0..20usize {
            publisher.publish(FeedEvent {
                queue: Some(queue),
                ..FeedEvent::default()
            });
        }
    });
    handle.join().expect("publisher thread");

    let queues: Vec<usize> = sub.drain().into_iter().filter_map(|e| e.queue).collect();
    assert_eq!(queues, (0..20).collect::<Vec<_>>());
}

// ============================================================================
// Wire format: tolerant reader
// ============================================================================

#[test]
fn test_full_event_parses() {
    let json = r#"{
        "config": {
            "branding": "Metro Scanner",
            "keyboardShortcuts": true,
            "showListenersCount": true,
            "systems": [
                {"id": 1, "label": "Metro", "talkgroups": [{"id": 101, "label": "Dispatch"}]}
            ]
        },
        "livefeedMode": "online",
        "listeners": 12,
        "queue": 2
    }"#;

    let event: FeedEvent = serde_json::from_str(json).expect("parse");
    let config = event.config.expect("present").expect("non-null");
    assert_eq!(config.branding.as_deref(), Some("Metro Scanner"));
    assert!(config.keyboard_shortcuts);
    assert_eq!(config.systems[0].talkgroups[0].label, "Dispatch");
    assert_eq!(event.livefeed_mode, Some(LivefeedMode::Online));
    assert_eq!(event.listeners, Some(12));
}

#[test]
fn test_unknown_fields_and_bad_mode_tolerated() {
    let json = r#"{
        "livefeedMode": "buffering",
        "auth": {"token": "abc"},
        "holdSys": true,
        "playbackList": []
    }"#;

    let event: FeedEvent = serde_json::from_str(json).expect("tolerant reader must not error");
    assert_eq!(event.livefeed_mode, None);
    assert_eq!(event.config, None);
}

#[test]
fn test_event_roundtrip() {
    let event = FeedEvent {
        config: Some(Some(ScannerConfig::default())),
        livefeed_mode: Some(LivefeedMode::Playback),
        call: Some(Call {
            id: 7,
            system: "Metro".to_string(),
            talkgroup: "EMS".to_string(),
            received_at: chrono::Utc::now(),
        }),
        listeners: Some(3),
        queue: Some(0),
    };

    let json = serde_json::to_string(&event).expect("encode");
    let back: FeedEvent = serde_json::from_str(&json).expect("decode");
    assert_eq!(event, back);
}
