//! Call failure types.

use thiserror::Error;
use xcp_msgpack::DecodeError;

/// Errors surfaced to the caller of a boundary operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// A request or response payload failed to decode.
    #[error("payload decode failed: {0}")]
    Codec(#[from] DecodeError),

    /// The execution boundary itself failed (sandbox fault, dead instance).
    ///
    /// Produced only by external [`BoundaryInstance`](crate::BoundaryInstance)
    /// implementations; the in-process runtime never raises it.
    #[error("boundary failure: {message}")]
    Boundary {
        /// Runtime-specific description.
        message: String,
    },
}

impl CallError {
    /// Convenience constructor for boundary faults.
    #[must_use]
    pub fn boundary(message: impl Into<String>) -> Self {
        Self::Boundary {
            message: message.into(),
        }
    }
}
