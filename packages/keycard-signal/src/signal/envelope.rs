//! Signal envelope: the JSON document every signal travels in.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A typed signal sent upward to the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Signal type, e.g. `keycard.connected`
    #[serde(rename = "type")]
    pub signal_type: String,
    /// Signal payload
    pub event: serde_json::Value,
}

impl Envelope {
    /// Create a new envelope of the given type around `event`
    pub fn new<T: Serialize + ?Sized>(signal_type: impl Into<String>, event: &T) -> Result<Self> {
        Ok(Self {
            signal_type: signal_type.into(),
            event: serde_json::to_value(event)?,
        })
    }

    /// Encode as JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }
}
