//! The per-type codec seam.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::DecodeError;
use crate::sizer::Sizer;
use crate::writer::Writer;

/// A value that knows its own schema-driven wire representation.
///
/// `write` is a single implementation driven twice — once against a
/// [`Sizer`], once against an [`Encoder`] — so the two passes cannot drift
/// apart. [`Codec::to_bytes`] is the canonical size-then-encode entry point
/// and the only way payloads are produced for the call boundary.
pub trait Codec: Sized {
    /// Issue this value's write sequence against `writer`.
    fn write<W: Writer>(&self, writer: &mut W);

    /// Reconstruct a value from `decoder`.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] on malformed, truncated, or type-mismatched
    /// input; no partially populated value is returned.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Encode this value into a buffer sized exactly by a sizing pass.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut sizer = Sizer::new();
        self.write(&mut sizer);
        let mut encoder = Encoder::with_capacity(sizer.len());
        self.write(&mut encoder);
        let bytes = encoder.into_bytes();
        debug_assert_eq!(bytes.len(), sizer.len(), "sizer and encoder disagree");
        bytes
    }

    /// Decode a value from a complete payload.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] as for [`Codec::decode`].
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut decoder = Decoder::new(bytes);
        Self::decode(&mut decoder)
    }
}
