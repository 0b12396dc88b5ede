//! Operation dispatch.

use std::collections::HashMap;

use crate::error::CallError;
use crate::operations;

/// A boundary-side operation handler: opaque request payload in, opaque
/// response payload out.
pub type Handler = Box<dyn Fn(&[u8]) -> Result<Vec<u8>, CallError> + Send + Sync>;

/// Immutable association from operation name to handler.
///
/// Built once at initialization with [`DispatchTable::with_operation`] and
/// then only read — there is no way to rebind a name after construction, and
/// no process-wide registry behind it.
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<&'static str, Handler>,
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort_unstable();
        f.debug_struct("DispatchTable")
            .field("operations", &names)
            .finish()
    }
}

impl DispatchTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: bind `operation` to `handler`.
    #[must_use]
    pub fn with_operation(
        mut self,
        operation: &'static str,
        handler: impl Fn(&[u8]) -> Result<Vec<u8>, CallError> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(operation, Box::new(handler));
        self
    }

    /// Operation names bound in this table, sorted.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch one call.
    ///
    /// An unrecognized operation name completes with the fixed
    /// [`operations::UNIMPLEMENTED_PAYLOAD`] sentinel rather than failing the
    /// transport.
    ///
    /// # Errors
    /// Propagates the handler's failure (typically a request decode error).
    pub fn dispatch(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        match self.handlers.get(operation) {
            Some(handler) => {
                tracing::debug!(operation, request_len = payload.len(), "dispatching call");
                handler(payload)
            }
            None => {
                tracing::warn!(operation, "unrecognized operation, returning sentinel");
                Ok(operations::UNIMPLEMENTED_PAYLOAD.to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_bound_handler() {
        let table =
            DispatchTable::new().with_operation("echo", |payload| Ok(payload.to_vec()));
        assert_eq!(table.dispatch("echo", b"abc").unwrap(), b"abc");
    }

    #[test]
    fn unknown_operation_returns_sentinel() {
        let table = DispatchTable::new();
        let response = table.dispatch("nope", b"").unwrap();
        assert!(operations::is_unimplemented(&response));
    }

    #[test]
    fn operations_are_listed_sorted() {
        let table = DispatchTable::new()
            .with_operation("b", |_| Ok(Vec::new()))
            .with_operation("a", |_| Ok(Vec::new()));
        assert_eq!(table.operations(), vec!["a", "b"]);
    }
}
