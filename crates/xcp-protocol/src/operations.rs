//! The operation name catalog and the unimplemented-operation sentinel.
//!
//! Names are part of the wire contract shared with the independently built
//! boundary-side implementations this suite exercises; they are matched
//! byte-for-byte.

/// Argument-style round trip: four discrete inputs, one aggregate output.
pub const TEST_FUNCTION: &str = "testFunction";

/// Envelope-style round trip: one aggregate input, one aggregate output.
pub const TEST_UNARY: &str = "testUnary";

/// Diagnostic: one aggregate input, one formatted multi-line string output.
pub const TEST_DECODE: &str = "testDecode";

/// Fixed response payload for an operation name the boundary side does not
/// implement. Returned as a completed call, distinct from a transport fault.
pub const UNIMPLEMENTED_PAYLOAD: &[u8] = b"unimplemented";

/// True if `payload` is the unimplemented-operation sentinel.
#[must_use]
pub fn is_unimplemented(payload: &[u8]) -> bool {
    payload == UNIMPLEMENTED_PAYLOAD
}
