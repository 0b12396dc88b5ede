//! Conformance tooling for the XCP boundary-call suite.
//!
//! This crate proves that independently built boundary-side codec
//! implementations agree byte-for-byte and value-for-value:
//! - **Canonical vector**: one aggregate carrying boundary/extreme values
//!   for every scalar kind
//! - **Golden vectors**: byte-exact expected encodings (hex) with `verify()`
//! - **Harness**: drives the three suite operations against any
//!   [`BoundaryInstance`](xcp_protocol::BoundaryInstance) and asserts deep
//!   round-trip equality and exact diagnostic output
//!
//! Correctness here is only observable across the call boundary: every check
//! sends a payload through an instance and inspects what comes back.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod golden;
pub mod harness;
pub mod normalize;
mod tracing_init;
pub mod vectors;

pub use golden::WireGoldenVector;
pub use harness::{CheckFailure, ConformanceSuite, SuiteSummary};
pub use normalize::normalize_float_spelling;
pub use tracing_init::init_test_tracing;
pub use vectors::{canonical_envelope, expected_diagnostic};
