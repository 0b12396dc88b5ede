//! In-process boundary-side implementation.

use xcp_core::{CallArguments, Codec, TestEnvelope};

use crate::boundary::{string_payload, BoundaryInstance};
use crate::diagnostic::render_diagnostic;
use crate::dispatch::DispatchTable;
use crate::error::CallError;
use crate::operations;

/// The reference boundary-side implementation, running the standard
/// operation set in-process behind the same opaque-payload seam a sandboxed
/// module would sit behind.
#[derive(Debug)]
pub struct GuestRuntime {
    table: DispatchTable,
}

impl Default for GuestRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestRuntime {
    /// Build the runtime with the standard operation set bound.
    #[must_use]
    pub fn new() -> Self {
        let table = DispatchTable::new()
            .with_operation(operations::TEST_FUNCTION, handle_test_function)
            .with_operation(operations::TEST_UNARY, handle_test_unary)
            .with_operation(operations::TEST_DECODE, handle_test_decode);
        Self { table }
    }

    /// The runtime's dispatch table.
    #[must_use]
    pub const fn table(&self) -> &DispatchTable {
        &self.table
    }
}

impl BoundaryInstance for GuestRuntime {
    fn invoke(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        self.table.dispatch(operation, payload)
    }
}

/// Echo the four discrete arguments back as one aggregate.
fn handle_test_function(payload: &[u8]) -> Result<Vec<u8>, CallError> {
    let args = CallArguments::from_bytes(payload)?;
    Ok(TestEnvelope::from(args).to_bytes())
}

/// Echo the aggregate unchanged.
fn handle_test_unary(payload: &[u8]) -> Result<Vec<u8>, CallError> {
    let envelope = TestEnvelope::from_bytes(payload)?;
    Ok(envelope.to_bytes())
}

/// Decode the aggregate and reply with the rendered diagnostic block.
fn handle_test_decode(payload: &[u8]) -> Result<Vec<u8>, CallError> {
    let envelope = TestEnvelope::from_bytes(payload)?;
    Ok(string_payload(&render_diagnostic(&envelope.required)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryClient;
    use xcp_core::{ListValue, Required, Thing};

    fn sample_envelope() -> TestEnvelope {
        TestEnvelope::default()
            .with_required(Required {
                bool_value: true,
                u64_value: u64::MAX,
                string_value: "test".into(),
                bytes_value: b"test".to_vec(),
                object_value: Thing::new("test"),
                ..Required::default()
            })
            .with_lists(ListValue {
                list_objects_optional: vec![Some(Thing::new("test"))],
                ..ListValue::default()
            })
    }

    #[test]
    fn argument_style_round_trip_echoes_every_part() {
        let envelope = sample_envelope();
        let mut client = BoundaryClient::new(GuestRuntime::new());
        let echoed = client
            .test_function(
                &envelope.required,
                &envelope.optional,
                &envelope.maps,
                &envelope.lists,
            )
            .unwrap();
        assert_eq!(echoed, envelope);
    }

    #[test]
    fn envelope_style_round_trip_echoes_every_part() {
        let envelope = sample_envelope();
        let mut client = BoundaryClient::new(GuestRuntime::new());
        assert_eq!(client.test_unary(&envelope).unwrap(), envelope);
    }

    #[test]
    fn diagnostic_returns_rendered_block() {
        let envelope = sample_envelope();
        let mut client = BoundaryClient::new(GuestRuntime::new());
        let text = client.test_decode(&envelope).unwrap();
        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("\n}"));
        assert!(text.contains("18446744073709551615"));
    }

    #[test]
    fn unknown_operation_completes_with_sentinel() {
        let mut runtime = GuestRuntime::new();
        let response = runtime.invoke("renamedOperation", b"").unwrap();
        assert!(operations::is_unimplemented(&response));
    }

    #[test]
    fn malformed_request_fails_the_call() {
        let mut runtime = GuestRuntime::new();
        let result = runtime.invoke(operations::TEST_UNARY, &[0xdb, 0xff, 0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(CallError::Codec(_))));
    }
}
