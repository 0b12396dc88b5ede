//! The canonical test vector and its expected diagnostic output.

use std::collections::HashMap;

use xcp_core::{ListValue, MapValue, Optional, Required, TestEnvelope, Thing};

/// Build the canonical aggregate: boundary/extreme values for every scalar
/// kind, non-empty string/byte content, one populated entry per mapping, and
/// one populated list of each kind (the nullable-object list holds a present
/// element).
///
/// The nullable record leaves exactly one field null (the boolean) so a
/// single vector exercises both null and present nullable encodings.
#[must_use]
pub fn canonical_envelope() -> TestEnvelope {
    let required = Required {
        bool_value: true,
        u8_value: u8::MAX,
        u16_value: u16::MAX,
        u32_value: u32::MAX,
        u64_value: u64::MAX,
        s8_value: i8::MIN,
        s16_value: i16::MIN,
        s32_value: i32::MIN,
        s64_value: i64::MIN,
        f32_value: f32::MAX,
        f64_value: f64::MAX,
        string_value: "test".into(),
        bytes_value: b"test".to_vec(),
        object_value: Thing::new("test"),
    };

    let optional = Optional {
        bool_value: None,
        u8_value: Some(u8::MAX),
        u16_value: Some(u16::MAX),
        u32_value: Some(u32::MAX),
        u64_value: Some(u64::MAX),
        s8_value: Some(i8::MIN),
        s16_value: Some(i16::MIN),
        s32_value: Some(i32::MIN),
        s64_value: Some(i64::MIN),
        f32_value: Some(f32::MAX),
        f64_value: Some(f64::MAX),
        string_value: Some("test".into()),
        bytes_value: Some(b"test".to_vec()),
        object_value: Some(Thing::new("test")),
    };

    let maps = MapValue {
        map_strings: HashMap::from([(1234, "test".to_owned())]),
        map_u64s: HashMap::from([(5678, 1234)]),
    };

    let lists = ListValue {
        list_strings: vec!["test".into()],
        list_u64s: vec![1234],
        list_objects: vec![Thing::new("test")],
        list_objects_optional: vec![Some(Thing::new("test"))],
    };

    TestEnvelope::default()
        .with_required(required)
        .with_optional(optional)
        .with_maps(maps)
        .with_lists(lists)
}

/// The exact diagnostic block the `testDecode` operation must produce for
/// [`canonical_envelope`], after float-spelling normalization.
#[must_use]
pub fn expected_diagnostic() -> String {
    [
        "{",
        "true",
        "255",
        "65535",
        "4294967295",
        "18446744073709551615",
        "-128",
        "-32768",
        "-2147483648",
        "-9223372036854775808",
        "3.4028234663852887e+38",
        "1.7976931348623157e+308",
        "test",
        "test",
        "}",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcp_core::Codec;

    #[test]
    fn canonical_envelope_roundtrips_locally() {
        let envelope = canonical_envelope();
        assert_eq!(
            TestEnvelope::from_bytes(&envelope.to_bytes()).unwrap(),
            envelope
        );
    }

    #[test]
    fn expected_diagnostic_is_brace_wrapped_and_complete() {
        let text = expected_diagnostic();
        assert_eq!(text.lines().count(), 15);
        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("\n}"));
    }
}
