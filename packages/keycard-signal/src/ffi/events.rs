//! # FFI Event Bridge
//!
//! Pushes signals from Rust to the native host via a registered C callback.
//! Without a callback, events go to the host's default notification path
//! (installed with [`keycard_set_fallback_callback`]).

use once_cell::sync::Lazy;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::sync::Arc;

use super::types::{cstr_to_string, FfiResult};
use crate::config::SinkConfig;
use crate::error::Error;
use crate::listener::{EventListener, SharedListener};
use crate::signal::SignalEmitter;
use crate::sink::EventSink;

/// C callback type for pushing events to the host
pub type EventCallback = extern "C" fn(json_event: *const c_char);

// ============================================================================
// GLOBAL SINK
// ============================================================================

static SINK: Lazy<EventSink> = Lazy::new(EventSink::default);

static EMITTER: Lazy<SignalEmitter> = Lazy::new(|| SignalEmitter::new(SINK.clone()));

/// The process-wide sink behind the C entry points
pub fn global_sink() -> &'static EventSink {
    &SINK
}

/// Emitter that sends signals through [`global_sink`]
pub fn global_emitter() -> &'static SignalEmitter {
    &EMITTER
}

/// Listener adapter around a host C callback
struct CCallback(EventCallback);

impl EventListener for CCallback {
    fn on_event(&self, payload: &str) {
        match CString::new(payload) {
            Ok(json) => (self.0)(json.as_ptr()),
            Err(e) => tracing::warn!(error = %Error::from(e), "Event not forwarded to host"),
        }
    }

    fn accepts(&self, payload: &str) -> bool {
        !payload.contains('\0')
    }

    fn on_c_event(&self, payload: &CStr) {
        (self.0)(payload.as_ptr())
    }
}

fn wrap(cb: Option<EventCallback>) -> Option<SharedListener> {
    cb.map(|cb| Arc::new(CCallback(cb)) as SharedListener)
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// Register the event callback from the native side.
/// Passing null clears it.
#[no_mangle]
pub extern "C" fn keycard_set_event_callback(cb: Option<EventCallback>) {
    SINK.set_callback(wrap(cb));
}

/// Register the event callback from an opaque pointer.
///
/// # Safety
/// `cb` must be null or a function with the [`EventCallback`] signature.
#[no_mangle]
pub unsafe extern "C" fn keycard_set_signal_event_callback(cb: *mut c_void) {
    let callback = if cb.is_null() {
        None
    } else {
        Some(std::mem::transmute::<*mut c_void, EventCallback>(cb))
    };
    SINK.set_callback(wrap(callback));
}

/// Install the host's default notification path, used while no callback is
/// registered. Passing null removes it.
#[no_mangle]
pub extern "C" fn keycard_set_fallback_callback(cb: Option<EventCallback>) {
    SINK.set_fallback(wrap(cb));
}

/// Reconfigure the global sink from JSON, e.g. `{"policy":"drop"}`.
/// On success the applied configuration is returned as JSON.
///
/// # Safety
/// `config_json` must be null or point to a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn keycard_signal_configure(config_json: *const c_char) -> FfiResult {
    if config_json.is_null() {
        return FfiResult::err(Error::NullPointer.code(), Error::NullPointer.to_string());
    }
    let json = match cstr_to_string(config_json) {
        Some(j) => j,
        None => {
            let e = Error::InvalidConfig("config is not valid UTF-8".to_string());
            return FfiResult::err(e.code(), e.to_string());
        }
    };

    let applied = SinkConfig::from_json(&json).and_then(|config| {
        SINK.configure(config.clone());
        Ok(serde_json::to_string(&config)?)
    });
    FfiResult::from_result(applied)
}

// ============================================================================
// EVENT EMISSION
// ============================================================================

/// Push an event into the bridge. Always returns `true`; the return value
/// does not confirm that anyone received the event.
///
/// C callbacks receive `json_event` byte for byte. A panic raised by a Rust
/// listener unwinds into the caller; hosts that cannot unwind must not
/// install listeners that panic.
///
/// # Safety
/// `json_event` must be null or point to a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C-unwind" fn keycard_service_signal_event(json_event: *const c_char) -> bool {
    if json_event.is_null() {
        tracing::warn!("Null event pushed to signal bridge");
        return true;
    }
    SINK.deliver_c_str(CStr::from_ptr(json_event));
    true
}

// ============================================================================
// TESTS
// ============================================================================
