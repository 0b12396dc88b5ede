//! The execution-boundary seam and the typed caller-side surface.

use xcp_core::{CallArguments, Codec, ListValue, MapValue, Optional, Required, TestEnvelope};
use xcp_msgpack::{Decoder, Encoder, Sizer, Writer};

use crate::error::CallError;
use crate::operations;

/// One side of the execution boundary.
///
/// Calls are synchronous: the caller blocks until the instance returns a
/// response payload or a failure, and at most one call is in flight per
/// instance. Implementations wrap whatever actually executes the compiled
/// module (an in-process dispatch table, a sandboxed runtime, a remote
/// process); the payload is opaque at this seam.
pub trait BoundaryInstance {
    /// Invoke `operation` with a single opaque request payload, yielding a
    /// single opaque response payload.
    ///
    /// # Errors
    /// Returns [`CallError`] if the payload is rejected or the boundary
    /// itself fails.
    fn invoke(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError>;
}

impl<I: BoundaryInstance + ?Sized> BoundaryInstance for &mut I {
    fn invoke(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        (**self).invoke(operation, payload)
    }
}

/// Typed caller-side wrapper over a [`BoundaryInstance`].
///
/// Encodes requests, invokes the named operation, and decodes responses, so
/// harness code works with values rather than payloads.
#[derive(Debug)]
pub struct BoundaryClient<I> {
    instance: I,
}

impl<I: BoundaryInstance> BoundaryClient<I> {
    /// Wrap `instance`.
    pub const fn new(instance: I) -> Self {
        Self { instance }
    }

    /// Unwrap the underlying instance.
    pub fn into_inner(self) -> I {
        self.instance
    }

    /// Argument-style round trip: four discrete inputs, one aggregate output.
    ///
    /// # Errors
    /// Returns [`CallError`] on boundary failure or an undecodable response.
    pub fn test_function(
        &mut self,
        required: &Required,
        optional: &Optional,
        maps: &MapValue,
        lists: &ListValue,
    ) -> Result<TestEnvelope, CallError> {
        let args = CallArguments {
            required: required.clone(),
            optional: optional.clone(),
            maps: maps.clone(),
            lists: lists.clone(),
        };
        let response = self
            .instance
            .invoke(operations::TEST_FUNCTION, &args.to_bytes())?;
        Ok(TestEnvelope::from_bytes(&response)?)
    }

    /// Envelope-style round trip: one aggregate in, one aggregate out.
    ///
    /// # Errors
    /// Returns [`CallError`] on boundary failure or an undecodable response.
    pub fn test_unary(&mut self, envelope: &TestEnvelope) -> Result<TestEnvelope, CallError> {
        let response = self
            .instance
            .invoke(operations::TEST_UNARY, &envelope.to_bytes())?;
        Ok(TestEnvelope::from_bytes(&response)?)
    }

    /// Diagnostic: one aggregate in, one formatted string out.
    ///
    /// # Errors
    /// Returns [`CallError`] on boundary failure or an undecodable response.
    pub fn test_decode(&mut self, envelope: &TestEnvelope) -> Result<String, CallError> {
        let response = self
            .instance
            .invoke(operations::TEST_DECODE, &envelope.to_bytes())?;
        let mut decoder = Decoder::new(&response);
        Ok(decoder.read_str()?)
    }

    /// Raw invoke passthrough, for checks that exercise the envelope itself
    /// (unknown operation names, hand-built payloads).
    ///
    /// # Errors
    /// Returns [`CallError`] as for [`BoundaryInstance::invoke`].
    pub fn invoke_raw(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        self.instance.invoke(operation, payload)
    }
}

/// Encode a bare string response payload (the diagnostic operation's reply
/// shape) with the standard size-then-encode discipline.
#[must_use]
pub(crate) fn string_payload(value: &str) -> Vec<u8> {
    let mut sizer = Sizer::new();
    sizer.write_str(value);
    let mut encoder = Encoder::with_capacity(sizer.len());
    encoder.write_str(value);
    encoder.into_bytes()
}
