//! Keycard signal types.

use serde::Serialize;

use super::SignalEmitter;
use crate::error::Result;
use crate::sink::Delivery;

/// Sent when a keycard connection is established
pub const KEYCARD_CONNECTED: &str = "keycard.connected";

impl SignalEmitter {
    /// Send a [`KEYCARD_CONNECTED`] signal
    pub fn send_keycard_connected<T: Serialize + ?Sized>(&self, event: &T) -> Result<Delivery> {
        self.send(KEYCARD_CONNECTED, event)
    }
}
