//! # Sink Configuration
//!
//! Controls what an [`EventSink`](crate::EventSink) does with an event when
//! no callback is registered, and how much of each payload is logged.
//!
//! ```json
//! { "policy": "drop", "log_payloads": true }
//! ```
//!
//! Missing fields take their defaults, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with an event when the callback slot is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSubscriberPolicy {
    /// Forward the payload to the fallback destination supplied by the host
    #[default]
    Fallback,
    /// Discard the payload with no side effect
    Drop,
}

/// Configuration for an event sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Behaviour when no callback is registered
    pub policy: NoSubscriberPolicy,
    /// Include payload text in trace-level delivery logs
    pub log_payloads: bool,
}

impl SinkConfig {
    /// Config for a sink that discards events nobody listens to
    pub fn dropping() -> Self {
        Self {
            policy: NoSubscriberPolicy::Drop,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Whether payload text may appear in logs
    pub(crate) fn payloads_visible(&self) -> bool {
        self.log_payloads || cfg!(feature = "verbose-logging")
    }
}

// ============================================================================
// TESTS
// ============================================================================
