//! The per-implementation conformance suite.

use serde::{Deserialize, Serialize};
use xcp_core::{Codec, TestEnvelope, Writer};
use xcp_msgpack::{Encoder, Sizer};
use xcp_protocol::{operations, BoundaryClient, BoundaryInstance};

use crate::normalize::normalize_float_spelling;
use crate::vectors::{canonical_envelope, expected_diagnostic};

/// Summary of one implementation's suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Implementation under test (one summary per boundary instance).
    pub implementation: String,
    /// Total checks run.
    pub total: usize,
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
    /// Failures with descriptions.
    pub failures: Vec<CheckFailure>,
}

impl SuiteSummary {
    fn new(implementation: impl Into<String>) -> Self {
        Self {
            implementation: implementation.into(),
            total: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// True if every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// A single failed check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFailure {
    /// Check identifier (stable string for CI parsing).
    pub check: String,
    /// What diverged.
    pub message: String,
}

/// Drives the three suite operations against one boundary-side
/// implementation and asserts round-trip and diagnostic equality.
pub struct ConformanceSuite;

impl ConformanceSuite {
    /// Run every check against `instance`, collecting results under
    /// `implementation`'s name.
    pub fn run<I: BoundaryInstance>(implementation: &str, instance: I) -> SuiteSummary {
        let mut summary = SuiteSummary::new(implementation);
        let mut client = BoundaryClient::new(instance);

        run_check(&mut summary, "argument_round_trip", || {
            argument_round_trip(&mut client)
        });
        run_check(&mut summary, "envelope_round_trip", || {
            envelope_round_trip(&mut client)
        });
        run_check(&mut summary, "diagnostic_output", || {
            diagnostic_output(&mut client)
        });
        run_check(&mut summary, "null_vs_zero", || null_vs_zero(&mut client));
        run_check(&mut summary, "forward_compat_skip", || {
            forward_compat_skip(&mut client)
        });
        run_check(&mut summary, "size_encode_agreement", || {
            size_encode_agreement()
        });
        run_check(&mut summary, "unknown_operation_sentinel", || {
            unknown_operation_sentinel(&mut client)
        });

        tracing::info!(
            implementation = %summary.implementation,
            passed = summary.passed,
            failed = summary.failed,
            "conformance suite finished"
        );
        summary
    }
}

fn run_check<F>(summary: &mut SuiteSummary, name: &str, check: F)
where
    F: FnOnce() -> Result<(), String>,
{
    summary.total += 1;
    match check() {
        Ok(()) => summary.passed += 1,
        Err(message) => {
            summary.failed += 1;
            summary.failures.push(CheckFailure {
                check: name.to_owned(),
                message,
            });
        }
    }
}

/// Deep equality including bit-exact float comparison; `PartialEq` alone
/// would accept a float that merely compares equal after a lossy widen.
fn deep_equal(expected: &TestEnvelope, actual: &TestEnvelope) -> Result<(), String> {
    if actual != expected {
        return Err(format!(
            "envelope mismatch\n  expected: {expected:?}\n  actual:   {actual:?}"
        ));
    }
    let float_pairs = [
        (
            "required.f32Value",
            u64::from(expected.required.f32_value.to_bits()),
            u64::from(actual.required.f32_value.to_bits()),
        ),
        (
            "required.f64Value",
            expected.required.f64_value.to_bits(),
            actual.required.f64_value.to_bits(),
        ),
    ];
    for (field, want, got) in float_pairs {
        if want != got {
            return Err(format!("{field} not bit-exact: {want:#x} vs {got:#x}"));
        }
    }
    match (expected.optional.f32_value, actual.optional.f32_value) {
        (Some(want), Some(got)) if want.to_bits() != got.to_bits() => {
            return Err("optional.f32Value not bit-exact".into());
        }
        _ => {}
    }
    match (expected.optional.f64_value, actual.optional.f64_value) {
        (Some(want), Some(got)) if want.to_bits() != got.to_bits() => {
            return Err("optional.f64Value not bit-exact".into());
        }
        _ => {}
    }
    Ok(())
}

fn argument_round_trip<I: BoundaryInstance>(client: &mut BoundaryClient<I>) -> Result<(), String> {
    let envelope = canonical_envelope();
    let echoed = client
        .test_function(
            &envelope.required,
            &envelope.optional,
            &envelope.maps,
            &envelope.lists,
        )
        .map_err(|e| format!("call failed: {e}"))?;
    deep_equal(&envelope, &echoed)
}

fn envelope_round_trip<I: BoundaryInstance>(client: &mut BoundaryClient<I>) -> Result<(), String> {
    let envelope = canonical_envelope();
    let echoed = client
        .test_unary(&envelope)
        .map_err(|e| format!("call failed: {e}"))?;
    deep_equal(&envelope, &echoed)
}

fn diagnostic_output<I: BoundaryInstance>(client: &mut BoundaryClient<I>) -> Result<(), String> {
    let envelope = canonical_envelope();
    let actual = client
        .test_decode(&envelope)
        .map_err(|e| format!("call failed: {e}"))?;
    let actual = normalize_float_spelling(&actual);
    let expected = expected_diagnostic();
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "diagnostic mismatch\n  expected:\n{expected}\n  actual:\n{actual}"
        ))
    }
}

/// Encoding every field null must come back all-null, never as present
/// zero values.
fn null_vs_zero<I: BoundaryInstance>(client: &mut BoundaryClient<I>) -> Result<(), String> {
    let envelope = TestEnvelope::default();
    let echoed = client
        .test_unary(&envelope)
        .map_err(|e| format!("call failed: {e}"))?;
    let o = &echoed.optional;
    let all_null = o.bool_value.is_none()
        && o.u8_value.is_none()
        && o.u16_value.is_none()
        && o.u32_value.is_none()
        && o.u64_value.is_none()
        && o.s8_value.is_none()
        && o.s16_value.is_none()
        && o.s32_value.is_none()
        && o.s64_value.is_none()
        && o.f32_value.is_none()
        && o.f64_value.is_none()
        && o.string_value.is_none()
        && o.bytes_value.is_none()
        && o.object_value.is_none();
    if all_null {
        Ok(())
    } else {
        Err(format!("null fields came back present: {o:?}"))
    }
}

/// A payload carrying an extra top-level field the receiver has never seen
/// must decode as if the field were not there.
fn forward_compat_skip<I: BoundaryInstance>(client: &mut BoundaryClient<I>) -> Result<(), String> {
    let envelope = canonical_envelope();
    let payload = payload_with_unknown_field(&envelope);
    let response = client
        .invoke_raw(operations::TEST_UNARY, &payload)
        .map_err(|e| format!("call failed: {e}"))?;
    let echoed =
        TestEnvelope::from_bytes(&response).map_err(|e| format!("response decode failed: {e}"))?;
    deep_equal(&envelope, &echoed)
}

fn payload_with_unknown_field(envelope: &TestEnvelope) -> Vec<u8> {
    fn write<W: Writer>(envelope: &TestEnvelope, w: &mut W) {
        w.write_map_header(5);
        // A field no released decoder knows, carrying a nested container.
        w.write_str("traceContext");
        w.write_array_header(3);
        w.write_u64(1);
        w.write_nil();
        w.write_str("x");
        w.write_str("required");
        envelope.required.write(w);
        w.write_str("optional");
        envelope.optional.write(w);
        w.write_str("maps");
        envelope.maps.write(w);
        w.write_str("lists");
        envelope.lists.write(w);
    }

    let mut sizer = Sizer::new();
    write(envelope, &mut sizer);
    let mut encoder = Encoder::with_capacity(sizer.len());
    write(envelope, &mut encoder);
    encoder.into_bytes()
}

/// The two-phase discipline: sized length equals encoded length, exactly.
fn size_encode_agreement() -> Result<(), String> {
    for envelope in [canonical_envelope(), TestEnvelope::default()] {
        let mut sizer = Sizer::new();
        envelope.write(&mut sizer);
        let encoded = envelope.to_bytes();
        if sizer.len() != encoded.len() {
            return Err(format!(
                "sized {} byte(s) but encoded {}",
                sizer.len(),
                encoded.len()
            ));
        }
    }
    Ok(())
}

fn unknown_operation_sentinel<I: BoundaryInstance>(
    client: &mut BoundaryClient<I>,
) -> Result<(), String> {
    let response = client
        .invoke_raw("operationAddedInV2", &canonical_envelope().to_bytes())
        .map_err(|e| format!("call failed: {e}"))?;
    if operations::is_unimplemented(&response) {
        Ok(())
    } else {
        Err(format!(
            "expected the unimplemented sentinel, got {} byte(s)",
            response.len()
        ))
    }
}
