//! # Keycard Signal
//!
//! Single-slot signal bridge between the keycard library and the native host
//! that embeds it.
//!
//! The host registers one callback; every event pushed into the bridge is
//! handed to that callback synchronously. With no callback registered the
//! event goes to a fallback destination or is dropped, depending on the
//! [`NoSubscriberPolicy`].
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Sink configuration
//! - [`listener`] - The listener capability
//! - [`sink`] - The single-slot event sink
//! - [`signal`] - Typed JSON signals built on top of a sink
//! - `ffi` - C entry points over a process-wide sink (feature `ffi`)
//!
//! ## Example
//!
//! ```
//! use keycard_signal::{Delivery, EventSink};
//!
//! let sink = EventSink::dropping();
//! sink.set_listener(|payload: &str| println!("event: {payload}"));
//!
//! assert_eq!(sink.deliver("{\"type\":\"ping\"}"), Delivery::Delivered);
//! assert!(sink.notify("{\"type\":\"pong\"}"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod error;
pub mod listener;
pub mod signal;
pub mod sink;

#[cfg(feature = "ffi")]
pub mod ffi;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{NoSubscriberPolicy, SinkConfig};
pub use error::{Error, Result};
pub use listener::{EventListener, SharedListener};
pub use signal::{Envelope, SignalEmitter, SignalHandler};
pub use sink::{Delivery, EventSink};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of the signal bridge
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
