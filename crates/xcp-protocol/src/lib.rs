//! Call envelope for the XCP boundary-call suite.
//!
//! An operation is identified by a name string; its request is a single
//! opaque binary payload and its response is a single opaque binary payload
//! (or a failure). This crate defines the three suite operations, the
//! immutable name-to-handler dispatch table, the [`BoundaryInstance`] seam
//! that sandbox runtimes implement, and the in-process [`GuestRuntime`] used
//! as the reference boundary-side implementation.
//!
//! Calls are synchronous and blocking; at most one call is in flight per
//! instance, and the dispatch table is a read-only association established
//! before any call is made.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod boundary;
mod diagnostic;
mod dispatch;
mod error;
mod guest;
pub mod operations;

pub use boundary::{BoundaryClient, BoundaryInstance};
pub use diagnostic::render_diagnostic;
pub use dispatch::{DispatchTable, Handler};
pub use error::CallError;
pub use guest::GuestRuntime;
