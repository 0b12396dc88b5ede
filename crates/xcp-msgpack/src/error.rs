//! Decode failure types.
//!
//! Encoding has no error type: values already satisfy their declared width
//! by construction, so an impossible write is a caller defect, not a runtime
//! condition. Decoding untrusted bytes can fail in the ways below; a failed
//! decode never yields a partially populated value.

use thiserror::Error;

/// Errors produced while decoding a wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended before the current value was complete.
    #[error("unexpected end of input at offset {offset} (need {needed} more byte(s))")]
    UnexpectedEof {
        /// Byte offset at which more input was required.
        offset: usize,
        /// Number of additional bytes required.
        needed: usize,
    },

    /// The format marker does not match the expected kind.
    #[error("expected {expected}, found marker 0x{found:02x} at offset {offset}")]
    TypeMismatch {
        /// Kind the caller asked for.
        expected: &'static str,
        /// Marker byte actually present.
        found: u8,
        /// Byte offset of the marker.
        offset: usize,
    },

    /// An integer value does not fit the declared width.
    #[error("integer {value} does not fit {target}")]
    IntegerOverflow {
        /// The decoded value.
        value: i128,
        /// Declared target width.
        target: &'static str,
    },

    /// A string payload is not valid UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the string payload.
        offset: usize,
    },

    /// A length or count header exceeds the remaining input.
    #[error("declared length {claimed} exceeds remaining input ({remaining} byte(s))")]
    LengthOverflow {
        /// Length claimed by the header.
        claimed: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// Value nesting exceeded the skip depth limit.
    #[error("value nesting exceeds the maximum depth of {max}")]
    DepthLimitExceeded {
        /// The enforced limit.
        max: usize,
    },
}
