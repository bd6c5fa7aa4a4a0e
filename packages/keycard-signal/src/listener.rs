//! # Event Listeners
//!
//! The consumer side of an [`EventSink`](crate::EventSink). A listener
//! receives the payload by reference for the duration of the call only.
//!
//! Payloads pushed in by a native host arrive as C strings and reach
//! [`EventListener::on_c_event`]. Listeners that can take the raw bytes
//! override it; everyone else sees the text decoded.

use std::ffi::CStr;
use std::sync::Arc;

/// Receiver for event payloads
pub trait EventListener: Send + Sync {
    /// Handle one event payload
    fn on_event(&self, payload: &str);

    /// Whether `payload` can be handed to this listener at all.
    /// A rejected payload is dropped before any outcome is reported.
    fn accepts(&self, _payload: &str) -> bool {
        true
    }

    /// Handle a payload that arrived as a C string. Invalid UTF-8 is
    /// replaced with U+FFFD unless the listener overrides this.
    fn on_c_event(&self, payload: &CStr) {
        self.on_event(&payload.to_string_lossy())
    }
}

impl<F> EventListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_event(&self, payload: &str) {
        self(payload)
    }
}

/// Shared handle to a listener, as stored in a sink slot
pub type SharedListener = Arc<dyn EventListener>;
