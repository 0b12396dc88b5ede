//! Value model for the XCP boundary-call suite.
//!
//! Each record type here carries its declaration-order field catalog (the
//! camelCase wire names are normative) and its [`Codec`] implementation:
//! records encode as a self-describing map of (field name, field value)
//! pairs, written in declaration order, and decode by exact field-name match
//! with unrecognized names skipped for forward compatibility.
//!
//! All values are transient: constructed per call, immutable once encoded,
//! never persisted.
//!
//! [`Codec`]: xcp_msgpack::Codec

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod envelope;
mod lists;
mod maps;
mod optional;
mod required;
mod thing;

pub use envelope::{CallArguments, TestEnvelope};
pub use lists::ListValue;
pub use maps::MapValue;
pub use optional::Optional;
pub use required::Required;
pub use thing::Thing;

// Re-export the codec seam so downstream crates need only one import.
pub use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};
