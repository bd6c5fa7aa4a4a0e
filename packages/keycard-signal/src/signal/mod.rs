//! # Signals
//!
//! Typed signals sent upward to the host application.
//!
//! Each signal is wrapped in an [`Envelope`] and encoded as JSON. An
//! in-process [`SignalHandler`] takes precedence; without one the JSON text is
//! pushed through the [`EventSink`], which reaches the host's C callback or
//! its default notification path.
//!
//! ```text
//! send(type, event)
//!     │
//!     ├──► Envelope { type, event } ──► JSON
//!     │
//!     ├── handler set ──► handler(bytes)
//!     │
//!     └── otherwise ────► EventSink::deliver(json)
//! ```

mod envelope;
mod keycard;

pub use envelope::Envelope;
pub use keycard::KEYCARD_CONNECTED;

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::sink::{Delivery, EventSink};

/// In-process signal handler, receiving the encoded envelope
pub type SignalHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Builds envelopes and routes them to a handler or an event sink
#[derive(Clone)]
pub struct SignalEmitter {
    handler: Arc<RwLock<Option<SignalHandler>>>,
    sink: EventSink,
}

impl SignalEmitter {
    /// Create an emitter that falls back to `sink`
    pub fn new(sink: EventSink) -> Self {
        Self {
            handler: Arc::new(RwLock::new(None)),
            sink,
        }
    }

    /// The sink used when no handler is set
    pub fn sink(&self) -> &EventSink {
        &self.sink
    }

    /// Set or clear the in-process handler
    pub fn set_handler(&self, handler: Option<SignalHandler>) {
        tracing::debug!(registered = handler.is_some(), "Signal handler updated");
        *self.handler.write() = handler;
    }

    /// Send a signal of type `signal_type` carrying `event`
    pub fn send<T: Serialize + ?Sized>(&self, signal_type: &str, event: &T) -> Result<Delivery> {
        let data = Envelope::new(signal_type, event)
            .and_then(|envelope| envelope.to_json())
            .map_err(|e| {
                tracing::error!(signal_type, error = %e, "Marshalling signal envelope");
                e
            })?;

        let handler = self.handler.read().clone();
        match handler {
            Some(handler) => {
                handler(data.as_bytes());
                Ok(Delivery::Delivered)
            }
            None => Ok(self.sink.deliver(&data)),
        }
    }
}

impl Default for SignalEmitter {
    fn default() -> Self {
        Self::new(EventSink::default())
    }
}
