//! # Event Sink
//!
//! A single-slot event sink: at most one registered callback receives every
//! payload passed to [`EventSink::notify`].
//!
//! ## Delivery
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          EVENT DELIVERY                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  notify(payload)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  callback set? ──yes──► callback(payload)          → Delivered          │
//! │       │                                                                 │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  policy = Fallback and fallback set?                                    │
//! │       │──yes──► fallback(payload)                  → FallbackInvoked    │
//! │       │                                                                 │
//! │       no ─────► discard                            → DroppedNoSubscriber│
//! │                                                                         │
//! │  notify() returns true in every case.                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is synchronous on the calling thread. The slot is read under a
//! lock and the listener handle is cloned out before it runs, so a listener
//! may replace the callback from inside its own invocation.
//!
//! A listener may refuse a payload through [`EventListener::accepts`]. The
//! event is then dropped and reported as `DroppedNoSubscriber`.

use parking_lot::RwLock;
use std::ffi::CStr;
use std::sync::Arc;

use crate::config::{NoSubscriberPolicy, SinkConfig};
use crate::listener::{EventListener, SharedListener};

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The registered callback received the payload
    Delivered,
    /// No callback was registered; the fallback received the payload
    FallbackInvoked,
    /// Nobody received the payload
    DroppedNoSubscriber,
}

impl Delivery {
    /// Whether any listener saw the payload
    pub fn reached_listener(&self) -> bool {
        !matches!(self, Delivery::DroppedNoSubscriber)
    }
}

struct Slots {
    callback: Option<SharedListener>,
    fallback: Option<SharedListener>,
    config: SinkConfig,
}

/// Single-slot event sink
///
/// Cloning yields another handle to the same slot. Create separate sinks
/// with one of the constructors.
#[derive(Clone)]
pub struct EventSink {
    slots: Arc<RwLock<Slots>>,
}

impl EventSink {
    /// Create an empty sink with the given configuration
    pub fn new(config: SinkConfig) -> Self {
        Self {
            slots: Arc::new(RwLock::new(Slots {
                callback: None,
                fallback: None,
                config,
            })),
        }
    }

    /// Create a sink that discards events when no callback is registered
    pub fn dropping() -> Self {
        Self::new(SinkConfig::dropping())
    }

    /// Create a sink that forwards unclaimed events to `fallback`
    pub fn with_fallback(fallback: impl EventListener + 'static) -> Self {
        let sink = Self::new(SinkConfig::default());
        sink.set_fallback(Some(Arc::new(fallback)));
        sink
    }

    /// Replace the registered callback. `None` empties the slot.
    pub fn set_callback(&self, callback: Option<SharedListener>) {
        let registered = callback.is_some();
        let previous = std::mem::replace(&mut self.slots.write().callback, callback);
        tracing::debug!(
            registered,
            replaced = previous.is_some(),
            "Event callback updated"
        );
    }

    /// Register `listener` as the callback
    pub fn set_listener(&self, listener: impl EventListener + 'static) {
        self.set_callback(Some(Arc::new(listener)));
    }

    /// Replace the fallback destination
    pub fn set_fallback(&self, fallback: Option<SharedListener>) {
        let registered = fallback.is_some();
        self.slots.write().fallback = fallback;
        tracing::debug!(registered, "Fallback destination updated");
    }

    /// Change the behaviour for events nobody is subscribed to
    pub fn set_policy(&self, policy: NoSubscriberPolicy) {
        self.slots.write().config.policy = policy;
        tracing::debug!(?policy, "No-subscriber policy updated");
    }

    /// Replace the whole configuration
    pub fn configure(&self, config: SinkConfig) {
        tracing::debug!(?config, "Sink reconfigured");
        self.slots.write().config = config;
    }

    /// Current no-subscriber policy
    pub fn policy(&self) -> NoSubscriberPolicy {
        self.slots.read().config.policy
    }

    /// Check if a callback is registered
    pub fn has_callback(&self) -> bool {
        self.slots.read().callback.is_some()
    }

    fn select(&self) -> (Option<SharedListener>, Delivery, bool) {
        let slots = self.slots.read();
        let visible = slots.config.payloads_visible();
        match (&slots.callback, slots.config.policy, &slots.fallback) {
            (Some(cb), _, _) => (Some(cb.clone()), Delivery::Delivered, visible),
            (None, NoSubscriberPolicy::Fallback, Some(fb)) => {
                (Some(fb.clone()), Delivery::FallbackInvoked, visible)
            }
            _ => (None, Delivery::DroppedNoSubscriber, visible),
        }
    }

    /// Deliver `payload` and report where it went
    ///
    /// A payload the selected listener does not accept is dropped without
    /// trying the fallback.
    pub fn deliver(&self, payload: &str) -> Delivery {
        let (target, outcome, visible) = self.select();

        if let Some(listener) = &target {
            if !listener.accepts(payload) {
                tracing::debug!(?outcome, "Listener rejected payload, dropped");
                return Delivery::DroppedNoSubscriber;
            }
        }

        if visible {
            tracing::trace!(?outcome, payload, "Delivering event");
        } else {
            tracing::trace!(?outcome, len = payload.len(), "Delivering event");
        }

        match target {
            Some(listener) => listener.on_event(payload),
            None => tracing::debug!("No event subscriber, payload dropped"),
        }
        outcome
    }

    /// Deliver a payload that arrived as a C string. Listeners that take
    /// raw bytes receive it unchanged.
    pub fn deliver_c_str(&self, payload: &CStr) -> Delivery {
        let (target, outcome, visible) = self.select();

        if visible {
            tracing::trace!(?outcome, payload = %payload.to_string_lossy(), "Delivering event");
        } else {
            tracing::trace!(?outcome, len = payload.to_bytes().len(), "Delivering event");
        }

        match target {
            Some(listener) => listener.on_c_event(payload),
            None => tracing::debug!("No event subscriber, payload dropped"),
        }
        outcome
    }

    /// Deliver `payload`. Always returns `true`; use [`EventSink::deliver`]
    /// to learn whether a listener received it.
    pub fn notify(&self, payload: &str) -> bool {
        self.deliver(payload);
        true
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new(SinkConfig::default())
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.read();
        f.debug_struct("EventSink")
            .field("has_callback", &slots.callback.is_some())
            .field("has_fallback", &slots.fallback.is_some())
            .field("config", &slots.config)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, SharedListener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink_log = log.clone();
        let listener: SharedListener =
            Arc::new(move |payload: &str| sink_log.lock().push(payload.to_string()));
        (log, listener)
    }

    #[test]
    fn test_empty_dropping_sink_has_no_effect() {
        let sink = EventSink::dropping();
        assert!(sink.notify("evt"));
        assert_eq!(sink.deliver("evt"), Delivery::DroppedNoSubscriber);
        assert!(!sink.has_callback());
    }

    #[test]
    fn test_callback_receives_payload_once() {
        let sink = EventSink::dropping();
        let (log, listener) = recorder();
        sink.set_callback(Some(listener));

        let payload = r#"{"type":"keycard.connected","event":null}"#;
        assert_eq!(sink.deliver(payload), Delivery::Delivered);
        assert_eq!(*log.lock(), vec![payload.to_string()]);
    }

    #[test]
    fn test_registration_overwrites_previous_callback() {
        let sink = EventSink::dropping();
        let (first, f1) = recorder();
        let (second, f2) = recorder();

        sink.set_callback(Some(f1));
        sink.set_callback(Some(f2));
        sink.notify("evt");

        assert!(first.lock().is_empty());
        assert_eq!(*second.lock(), vec!["evt"]);
    }

    #[test]
    fn test_fallback_invoked_when_no_callback() {
        let (log, fallback) = recorder();
        let sink = EventSink::new(SinkConfig::default());
        sink.set_fallback(Some(fallback));

        assert_eq!(sink.deliver("resend"), Delivery::FallbackInvoked);
        assert_eq!(*log.lock(), vec!["resend"]);
    }

    #[test]
    fn test_fallback_skipped_once_callback_registered() {
        let (fallback_log, fallback) = recorder();
        let (callback_log, callback) = recorder();
        let sink = EventSink::new(SinkConfig::default());
        sink.set_fallback(Some(fallback));
        sink.set_callback(Some(callback));

        sink.notify("evt");
        assert!(fallback_log.lock().is_empty());
        assert_eq!(*callback_log.lock(), vec!["evt"]);
    }

    #[test]
    fn test_fallback_policy_without_fallback_drops() {
        let sink = EventSink::default();
        assert_eq!(sink.policy(), NoSubscriberPolicy::Fallback);
        assert_eq!(sink.deliver("evt"), Delivery::DroppedNoSubscriber);
    }

    #[test]
    fn test_drop_policy_ignores_fallback() {
        let (log, fallback) = recorder();
        let sink = EventSink::dropping();
        sink.set_fallback(Some(fallback));

        assert_eq!(sink.deliver("evt"), Delivery::DroppedNoSubscriber);
        assert!(log.lock().is_empty());

        sink.set_policy(NoSubscriberPolicy::Fallback);
        assert_eq!(sink.deliver("evt"), Delivery::FallbackInvoked);
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_notify_always_true() {
        let sink = EventSink::dropping();
        assert!(sink.notify("nobody"));

        let (_, fallback) = recorder();
        sink.set_policy(NoSubscriberPolicy::Fallback);
        sink.set_fallback(Some(fallback));
        assert!(sink.notify("fallback"));

        let (_, callback) = recorder();
        sink.set_callback(Some(callback));
        assert!(sink.notify("callback"));
    }

    #[test]
    fn test_events_delivered_in_order() {
        let sink = EventSink::dropping();
        let (log, listener) = recorder();
        sink.set_callback(Some(listener));

        sink.notify("evt1");
        sink.notify("evt2");
        assert_eq!(*log.lock(), vec!["evt1", "evt2"]);
    }

    #[test]
    fn test_clearing_callback() {
        let sink = EventSink::dropping();
        let (log, listener) = recorder();
        sink.set_callback(Some(listener));
        sink.set_callback(None);

        assert_eq!(sink.deliver("evt"), Delivery::DroppedNoSubscriber);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_clones_share_slot_and_sinks_are_independent() {
        let sink = EventSink::dropping();
        let handle = sink.clone();
        let other = EventSink::dropping();
        let (log, listener) = recorder();

        handle.set_callback(Some(listener));
        assert!(sink.has_callback());
        assert!(!other.has_callback());

        sink.notify("shared");
        other.notify("isolated");
        assert_eq!(*log.lock(), vec!["shared"]);
    }

    #[test]
    fn test_listener_may_reregister_during_delivery() {
        let sink = EventSink::dropping();
        let (log, replacement) = recorder();
        let inner = sink.clone();
        let pending = Mutex::new(Some(replacement));

        sink.set_listener(move |_: &str| {
            if let Some(next) = pending.lock().take() {
                inner.set_callback(Some(next));
            }
        });

        sink.notify("swap");
        sink.notify("after");
        assert_eq!(*log.lock(), vec!["after"]);
    }

    #[test]
    fn test_with_fallback_constructor() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let sink = EventSink::with_fallback(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sink.notify("a");
        sink.notify("b");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_configure_replaces_config() {
        let sink = EventSink::default();
        sink.configure(SinkConfig::dropping());
        assert_eq!(sink.policy(), NoSubscriberPolicy::Drop);
    }

    #[test]
    fn test_concurrent_notify_and_swap() {
        let sink = EventSink::dropping();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        sink.set_listener(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let notifiers: Vec<_> = (0..4)
            .map(|_| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        assert!(sink.notify("evt"));
                    }
                })
            })
            .collect();

        let counter = second.clone();
        sink.set_listener(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for handle in notifiers {
            handle.join().unwrap();
        }

        let total = first.load(Ordering::SeqCst) + second.load(Ordering::SeqCst);
        assert_eq!(total, 2000);
    }

    #[test]
    #[should_panic(expected = "listener failure")]
    fn test_listener_panic_propagates() {
        let sink = EventSink::dropping();
        sink.set_listener(|_: &str| panic!("listener failure"));
        sink.notify("evt");
    }

    struct NoNul {
        seen: Mutex<Vec<String>>,
    }

    impl EventListener for NoNul {
        fn on_event(&self, payload: &str) {
            self.seen.lock().push(payload.to_string());
        }

        fn accepts(&self, payload: &str) -> bool {
            !payload.contains('\0')
        }
    }

    #[test]
    fn test_rejected_payload_reports_drop() {
        let sink = EventSink::dropping();
        let listener = Arc::new(NoNul {
            seen: Mutex::new(Vec::new()),
        });
        sink.set_callback(Some(listener.clone()));

        assert_eq!(sink.deliver("a\0b"), Delivery::DroppedNoSubscriber);
        assert!(listener.seen.lock().is_empty());
        assert!(sink.notify("a\0b"));

        assert_eq!(sink.deliver("ab"), Delivery::Delivered);
        assert_eq!(*listener.seen.lock(), vec!["ab"]);
    }

    #[test]
    fn test_rejected_payload_skips_fallback() {
        let (fallback_log, fallback) = recorder();
        let sink = EventSink::default();
        sink.set_fallback(Some(fallback));
        sink.set_callback(Some(Arc::new(NoNul {
            seen: Mutex::new(Vec::new()),
        })));

        assert_eq!(sink.deliver("a\0b"), Delivery::DroppedNoSubscriber);
        assert!(fallback_log.lock().is_empty());
    }

    struct RawBytes {
        seen: Mutex<Vec<Vec<u8>>>,
    }

    impl EventListener for RawBytes {
        fn on_event(&self, payload: &str) {
            self.seen.lock().push(payload.as_bytes().to_vec());
        }

        fn on_c_event(&self, payload: &CStr) {
            self.seen.lock().push(payload.to_bytes().to_vec());
        }
    }

    #[test]
    fn test_c_str_bytes_reach_raw_listener_unchanged() {
        let sink = EventSink::dropping();
        let listener = Arc::new(RawBytes {
            seen: Mutex::new(Vec::new()),
        });
        sink.set_callback(Some(listener.clone()));

        let payload = CStr::from_bytes_with_nul(b"{\"k\":\"\xff\"}\0").unwrap();
        assert_eq!(sink.deliver_c_str(payload), Delivery::Delivered);
        assert_eq!(*listener.seen.lock(), vec![b"{\"k\":\"\xff\"}".to_vec()]);
    }

    #[test]
    fn test_c_str_outcomes() {
        let payload = CStr::from_bytes_with_nul(b"evt\0").unwrap();

        let sink = EventSink::dropping();
        assert_eq!(sink.deliver_c_str(payload), Delivery::DroppedNoSubscriber);

        let (log, fallback) = recorder();
        sink.set_policy(NoSubscriberPolicy::Fallback);
        sink.set_fallback(Some(fallback));
        assert_eq!(sink.deliver_c_str(payload), Delivery::FallbackInvoked);
        assert_eq!(*log.lock(), vec!["evt"]);
    }

    #[test]
    fn test_reached_listener() {
        assert!(Delivery::Delivered.reached_listener());
        assert!(Delivery::FallbackInvoked.reached_listener());
        assert!(!Delivery::DroppedNoSubscriber.reached_listener());
    }
}
