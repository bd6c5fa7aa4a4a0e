//! # FFI Bindings
//!
//! C ABI entry points used by the native host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FFI ARCHITECTURE                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Native host                                                            │
//! │    │  keycard_set_event_callback(cb)                                    │
//! │    │  keycard_set_fallback_callback(resend)                             │
//! │    │  keycard_service_signal_event(json) ──► true                       │
//! │    ▼                                                                    │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Process-wide EventSink (fallback policy)              │   │
//! │  │                                                                 │   │
//! │  │   callback slot ──► cb(json)                                    │   │
//! │  │   empty slot    ──► resend(json)                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │    ▲                                                                    │
//! │    │  global_emitter().send(type, event)                                │
//! │  Rust signal producers                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Registration and notification never fail. Configuration returns an
//! `FfiResult` with the error code from [`Error::code`](crate::Error::code).

mod events;
mod types;

pub use events::*;
pub use types::*;
