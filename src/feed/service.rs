//! In-process broadcast hub for live-feed events.
//!
//! [`FeedService`] fans every published [`FeedEvent`] out to its subscribers
//! in publish order and owns the small mode state machine driven by the
//! start/stop commands. Subscribers receive over a plain mpsc channel and
//! cancel by dropping or by calling [`Subscription::cancel`].

use super::types::{Call, FeedEvent, LivefeedMode, ScannerConfig};
use indexmap::IndexMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};

/// Shared hub state. Subscribers are kept in insertion order so fan-out is
/// deterministic.
#[derive(Debug, Default)]
struct Inner {
    subscribers: IndexMap<u64, Sender<FeedEvent>>,
    next_id: u64,
    mode: LivefeedMode,
    config: Option<ScannerConfig>,
}

/// Handle to the live-feed service. Cheap to clone; all clones share state.
#[derive(Debug, Clone, Default)]
pub struct FeedService {
    inner: Arc<Mutex<Inner>>,
}

impl FeedService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the event stream.
    ///
    /// The returned [`Subscription`] yields events in publish order until
    /// cancelled or dropped.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = {
            let mut inner = self.inner.lock().expect("feed service lock poisoned");
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, tx);
            id
        };
        Subscription {
            id,
            rx,
            service: self.clone(),
            cancelled: false,
        }
    }

    /// Current live-feed mode, as the service knows it.
    #[must_use]
    pub fn mode(&self) -> LivefeedMode {
        self.inner.lock().expect("feed service lock poisoned").mode
    }

    /// Request the live feed to start.
    ///
    /// Idempotent: starting an already-online feed publishes nothing.
    pub fn start_livefeed(&self) {
        self.transition(LivefeedMode::Online);
    }

    /// Request the live feed to stop.
    pub fn stop_livefeed(&self) {
        self.transition(LivefeedMode::Offline);
    }

    fn transition(&self, mode: LivefeedMode) {
        {
            let mut inner = self.inner.lock().expect("feed service lock poisoned");
            if inner.mode == mode {
                return;
            }
            inner.mode = mode;
        }
        tracing::debug!("livefeed mode -> {mode}");
        self.publish(FeedEvent::mode(mode));
    }

    /// Publish a configuration update (an explicit `None` clears the config
    /// on every subscriber that honors presence-based merging).
    pub fn publish_config(&self, config: Option<ScannerConfig>) {
        {
            let mut inner = self.inner.lock().expect("feed service lock poisoned");
            inner.config = config.clone();
        }
        self.publish(FeedEvent::config_update(config));
    }

    /// Publish a received call.
    pub fn publish_call(&self, call: Call) {
        self.publish(FeedEvent::call(call));
    }

    /// Broadcast an event to all live subscribers, pruning any whose
    /// receiving end has gone away.
    pub fn publish(&self, event: FeedEvent) {
        let mut inner = self.inner.lock().expect("feed service lock poisoned");
        let mut dead: Vec<u64> = Vec::new();
        for (id, tx) in &inner.subscribers {
            if tx.send(event.clone()).is_err() {
                dead.push(*id);
            }
        }
        for id in dead {
            tracing::warn!("pruning disconnected feed subscriber {id}");
            inner.subscribers.shift_remove(&id);
        }
    }

    fn unsubscribe(&self, id: u64) {
        let mut inner = self.inner.lock().expect("feed service lock poisoned");
        inner.subscribers.shift_remove(&id);
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .expect("feed service lock poisoned")
            .subscribers
            .len()
    }
}

/// A cancellable handle on the service's event stream.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<FeedEvent>,
    service: FeedService,
    cancelled: bool,
}

impl Subscription {
    /// Pull the next pending event, if any, without blocking.
    pub fn try_recv(&self) -> Option<FeedEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&self) -> Vec<FeedEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Cancel the subscription. Safe to call more than once; later calls
    /// are no-ops.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.service.unsubscribe(self.id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_receives_published_events() {
        let service = FeedService::new();
        let sub = service.subscribe();

        service.publish(FeedEvent::mode(LivefeedMode::Online));

        let event = sub.try_recv().expect("event delivered");
        assert_eq!(event.livefeed_mode, Some(LivefeedMode::Online));
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn test_events_delivered_in_publish_order() {
        let service = FeedService::new();
        let sub = service.subscribe();

        for queue in 0..5usize {
            service.publish(FeedEvent {
                queue: Some(queue),
                ..FeedEvent::default()
            });
        }

        let queues: Vec<usize> = sub.drain().into_iter().filter_map(|e| e.queue).collect();
        assert_eq!(queues, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_start_stop_drive_mode_and_broadcast() {
        let service = FeedService::new();
        let sub = service.subscribe();

        service.start_livefeed();
        assert_eq!(service.mode(), LivefeedMode::Online);
        service.stop_livefeed();
        assert_eq!(service.mode(), LivefeedMode::Offline);

        let modes: Vec<LivefeedMode> = sub
            .drain()
            .into_iter()
            .filter_map(|e| e.livefeed_mode)
            .collect();
        assert_eq!(modes, vec![LivefeedMode::Online, LivefeedMode::Offline]);
    }

    #[test]
    fn test_start_is_idempotent() {
        let service = FeedService::new();
        let sub = service.subscribe();

        service.start_livefeed();
        service.start_livefeed();

        assert_eq!(sub.drain().len(), 1, "repeated start publishes once");
    }

    #[test]
    fn test_cancel_stops_delivery_and_is_idempotent() {
        let service = FeedService::new();
        let mut sub = service.subscribe();
        assert_eq!(service.subscriber_count(), 1);

        sub.cancel();
        sub.cancel();
        assert_eq!(service.subscriber_count(), 0);

        service.publish(FeedEvent::mode(LivefeedMode::Online));
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let service = FeedService::new();
        {
            let _sub = service.subscribe();
            assert_eq!(service.subscriber_count(), 1);
        }
        assert_eq!(service.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_config_clear_reaches_subscribers() {
        let service = FeedService::new();
        let sub = service.subscribe();

        service.publish_config(Some(ScannerConfig::default()));
        service.publish_config(None);

        let events = sub.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].config, Some(Some(_))));
        assert_eq!(events[1].config, Some(None));
    }
}
