//! Schema-driven MessagePack codec for the XCP boundary-call suite.
//!
//! This crate implements the byte-level foundation for values exchanged
//! across the sandboxed call boundary:
//! - [`Sizer`]: exact encoded-length computation without producing bytes
//! - [`Encoder`]: wire-byte production into a pre-sized buffer
//! - [`Decoder`]: tolerant-reader decoding with unknown-field skipping
//! - [`Codec`]: the per-type seam tying the three together
//!
//! Encoding is two-phase by contract: a [`Sizer`] pass computes the exact
//! byte length, the buffer is reserved once, and an [`Encoder`] pass fills
//! it. `size(v) == encode(v).len()` holds for every value, with no slack
//! bytes.
//!
//! The writer is strict (smallest-fitting integer representation, exact-width
//! float markers); the reader is tolerant (any integer-family format is
//! accepted and range-checked into the declared width).

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod codec;
mod decoder;
mod encoder;
mod error;
pub mod format;
mod sizer;
mod writer;

pub use codec::Codec;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::DecodeError;
pub use sizer::Sizer;
pub use writer::Writer;
