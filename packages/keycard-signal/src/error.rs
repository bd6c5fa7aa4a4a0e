//! # Error Handling
//!
//! Error types for the signal bridge.
//!
//! Delivering an event never fails: the only fallible operations are
//! building envelopes, parsing configuration and reading arguments that
//! arrive over the C boundary.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Configuration Errors                                              │
//! │  │   └── InvalidConfig         - Config JSON could not be applied      │
//! │  │                                                                      │
//! │  ├── Payload Errors                                                    │
//! │  │   ├── InvalidPayload        - Payload cannot cross the boundary     │
//! │  │   └── NullPointer           - Host passed a null pointer            │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      ├── Serialization         - Envelope could not be encoded         │
//! │      └── Deserialization       - Envelope could not be decoded         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for signal bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the signal bridge
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors (100-199)
    // ========================================================================

    /// Configuration could not be parsed or applied
    #[error("Invalid sink configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Payload Errors (200-299)
    // ========================================================================

    /// Payload cannot be handed to a C callback
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// A required pointer argument was null
    #[error("Null pointer passed across the FFI boundary.")]
    NullPointer,

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Get the error code for FFI
    ///
    /// Error codes are organized by category:
    /// - 100-199: Configuration
    /// - 200-299: Payload
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) => 100,

            Error::InvalidPayload(_) => 200,
            Error::NullPointer => 201,

            Error::Serialization(_) => 900,
            Error::Deserialization(_) => 901,
        }
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(err: std::ffi::NulError) -> Self {
        Error::InvalidPayload(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
