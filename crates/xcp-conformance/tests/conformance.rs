//! End-to-end conformance runs against boundary-side implementations.

use xcp_conformance::{init_test_tracing, ConformanceSuite, WireGoldenVector};
use xcp_protocol::{BoundaryInstance, CallError, GuestRuntime};

#[test]
fn in_process_runtime_is_conformant() {
    init_test_tracing();
    let summary = ConformanceSuite::run("in-process", GuestRuntime::new());
    assert!(summary.all_passed(), "failures: {:#?}", summary.failures);
}

#[test]
fn golden_vectors_hold() {
    init_test_tracing();
    for vector in WireGoldenVector::load_all() {
        vector.verify().unwrap();
    }
}

#[test]
fn suite_can_borrow_an_instance() {
    // A long-lived instance is exercised by reference, matching runtimes
    // that are expensive to instantiate.
    let mut runtime = GuestRuntime::new();
    let first = ConformanceSuite::run("borrowed-1", &mut runtime);
    let second = ConformanceSuite::run("borrowed-2", &mut runtime);
    assert!(first.all_passed());
    assert!(second.all_passed());
}

/// An instance that drops every response payload's last byte. The harness
/// must convict it on every round-trip check rather than passing a
/// best-effort decode.
struct TruncatingInstance(GuestRuntime);

impl BoundaryInstance for TruncatingInstance {
    fn invoke(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        let mut response = self.0.invoke(operation, payload)?;
        response.pop();
        Ok(response)
    }
}

#[test]
fn harness_convicts_a_corrupting_implementation() {
    init_test_tracing();
    let summary = ConformanceSuite::run("truncating", TruncatingInstance(GuestRuntime::new()));
    assert!(!summary.all_passed());
    let failed: Vec<_> = summary.failures.iter().map(|f| f.check.as_str()).collect();
    assert!(failed.contains(&"argument_round_trip"));
    assert!(failed.contains(&"envelope_round_trip"));
}

/// An instance that answers every operation, including unknown ones, with an
/// echo. The sentinel check must catch it.
struct OverEagerInstance(GuestRuntime);

impl BoundaryInstance for OverEagerInstance {
    fn invoke(&mut self, operation: &str, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        match self.0.invoke(operation, payload) {
            Ok(response) if xcp_protocol::operations::is_unimplemented(&response) => {
                Ok(payload.to_vec())
            }
            other => other,
        }
    }
}

#[test]
fn harness_convicts_a_missing_sentinel() {
    init_test_tracing();
    let summary = ConformanceSuite::run("over-eager", OverEagerInstance(GuestRuntime::new()));
    let failed: Vec<_> = summary.failures.iter().map(|f| f.check.as_str()).collect();
    assert!(failed.contains(&"unknown_operation_sentinel"));
}
