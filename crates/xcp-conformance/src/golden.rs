//! Byte-exact golden vectors.
//!
//! These lock down the wire bytes of representative values. If an
//! implementation does not produce these exact bytes, it is non-conformant —
//! value-level round-trip equality alone is not enough to prove that two
//! codecs can read each other's output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use xcp_core::{Codec, ListValue, MapValue, Optional, Required, Thing};

/// A single byte-exact encoding expectation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireGoldenVector {
    /// Stable identifier (used by the vector generator CLI).
    pub name: String,
    /// Human-readable description of the case.
    pub description: String,
    /// Expected wire bytes, lowercase hex.
    pub expected_hex: String,
}

impl WireGoldenVector {
    /// Load all golden vectors.
    #[must_use]
    pub fn load_all() -> Vec<Self> {
        vec![
            Self {
                name: "thing_basic".into(),
                description: "Nested object holding one string".into(),
                expected_hex: concat!("81", "a576616c7565", "a474657374").into(),
            },
            Self {
                name: "required_extremes".into(),
                description: "Non-nullable record at every width's boundary value".into(),
                expected_hex: concat!(
                    "8e",
                    "a9626f6f6c56616c7565",
                    "c3",
                    "a7753856616c7565",
                    "ccff",
                    "a875313656616c7565",
                    "cdffff",
                    "a875333256616c7565",
                    "ceffffffff",
                    "a875363456616c7565",
                    "cfffffffffffffffff",
                    "a7733856616c7565",
                    "d080",
                    "a873313656616c7565",
                    "d18000",
                    "a873333256616c7565",
                    "d280000000",
                    "a873363456616c7565",
                    "d38000000000000000",
                    "a866333256616c7565",
                    "ca7f7fffff",
                    "a866363456616c7565",
                    "cb7fefffffffffffff",
                    "ab737472696e6756616c7565",
                    "a474657374",
                    "aa627974657356616c7565",
                    "c40474657374",
                    "ab6f626a65637456616c7565",
                    "81a576616c7565a474657374",
                )
                .into(),
            },
            Self {
                name: "optional_all_null".into(),
                description: "Nullable record with every field null (nil per field, never omitted)"
                    .into(),
                expected_hex: concat!(
                    "8e",
                    "a9626f6f6c56616c7565",
                    "c0",
                    "a7753856616c7565",
                    "c0",
                    "a875313656616c7565",
                    "c0",
                    "a875333256616c7565",
                    "c0",
                    "a875363456616c7565",
                    "c0",
                    "a7733856616c7565",
                    "c0",
                    "a873313656616c7565",
                    "c0",
                    "a873333256616c7565",
                    "c0",
                    "a873363456616c7565",
                    "c0",
                    "a866333256616c7565",
                    "c0",
                    "a866363456616c7565",
                    "c0",
                    "ab737472696e6756616c7565",
                    "c0",
                    "aa627974657356616c7565",
                    "c0",
                    "ab6f626a65637456616c7565",
                    "c0",
                )
                .into(),
            },
            Self {
                name: "maps_canonical".into(),
                description: "One entry per mapping: {1234:\"test\"} and {5678:1234}".into(),
                expected_hex: concat!(
                    "82",
                    "b26d6170537472696e675072696d6174697665",
                    "81",
                    "cd04d2",
                    "a474657374",
                    "af6d61705536345072696d6174697665",
                    "81",
                    "cd162e",
                    "cd04d2",
                )
                .into(),
            },
            Self {
                name: "lists_canonical".into(),
                description: "One element per sequence, nullable-object element present".into(),
                expected_hex: concat!(
                    "84",
                    "ab6c697374537472696e6773",
                    "91",
                    "a474657374",
                    "a86c69737455363473",
                    "91",
                    "cd04d2",
                    "ab6c6973744f626a65637473",
                    "91",
                    "81a576616c7565a474657374",
                    "b36c6973744f626a656374734f7074696f6e616c",
                    "91",
                    "81a576616c7565a474657374",
                )
                .into(),
            },
        ]
    }

    /// Verify this vector against the implementation: the value must encode
    /// to exactly the expected bytes, and those bytes must decode back to an
    /// equal value.
    ///
    /// # Errors
    /// Returns a description of the first mismatch.
    pub fn verify(&self) -> Result<(), String> {
        match self.name.as_str() {
            "thing_basic" => check(self, &Self::thing_basic()),
            "required_extremes" => check(self, &Self::required_extremes()),
            "optional_all_null" => check(self, &Optional::default()),
            "maps_canonical" => check(self, &Self::maps_canonical()),
            "lists_canonical" => check(self, &Self::lists_canonical()),
            other => Err(format!("unknown golden vector: {other}")),
        }
    }

    fn thing_basic() -> Thing {
        Thing::new("test")
    }

    fn required_extremes() -> Required {
        Required {
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
        }
    }

    fn maps_canonical() -> MapValue {
        MapValue {
            map_strings: HashMap::from([(1234, "test".to_owned())]),
            map_u64s: HashMap::from([(5678, 1234)]),
        }
    }

    fn lists_canonical() -> ListValue {
        ListValue {
            list_strings: vec!["test".into()],
            list_u64s: vec![1234],
            list_objects: vec![Thing::new("test")],
            list_objects_optional: vec![Some(Thing::new("test"))],
        }
    }
}

fn check<T: Codec + PartialEq>(vector: &WireGoldenVector, value: &T) -> Result<(), String> {
    let encoded = value.to_bytes();
    let got_hex = hex::encode(&encoded);
    if got_hex != vector.expected_hex {
        return Err(format!(
            "{}: encoded bytes mismatch\n  expected: {}\n  got:      {}",
            vector.name, vector.expected_hex, got_hex
        ));
    }

    let expected_bytes =
        hex::decode(&vector.expected_hex).map_err(|e| format!("{}: bad hex: {e}", vector.name))?;
    let decoded =
        T::from_bytes(&expected_bytes).map_err(|e| format!("{}: decode failed: {e}", vector.name))?;
    if decoded != *value {
        return Err(format!("{}: decoded value mismatch", vector.name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_golden_vectors_verify() {
        for vector in WireGoldenVector::load_all() {
            vector.verify().unwrap();
        }
    }

    #[test]
    fn vector_names_are_unique() {
        let vectors = WireGoldenVector::load_all();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
