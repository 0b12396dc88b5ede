//! The all-fields-present record: one field per scalar kind plus a nested
//! object.

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

use crate::thing::Thing;

/// Wire field names, declaration order.
mod field {
    pub const BOOL_VALUE: &str = "boolValue";
    pub const U8_VALUE: &str = "u8Value";
    pub const U16_VALUE: &str = "u16Value";
    pub const U32_VALUE: &str = "u32Value";
    pub const U64_VALUE: &str = "u64Value";
    pub const S8_VALUE: &str = "s8Value";
    pub const S16_VALUE: &str = "s16Value";
    pub const S32_VALUE: &str = "s32Value";
    pub const S64_VALUE: &str = "s64Value";
    pub const F32_VALUE: &str = "f32Value";
    pub const F64_VALUE: &str = "f64Value";
    pub const STRING_VALUE: &str = "stringValue";
    pub const BYTES_VALUE: &str = "bytesValue";
    pub const OBJECT_VALUE: &str = "objectValue";
}

const FIELD_COUNT: usize = 14;

/// Record whose every declared field is present and non-nullable.
///
/// Widths are fixed by the schema, never by the value: `u8_value` is an
/// 8-bit field even when it holds `3`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Required {
    /// Boolean field.
    pub bool_value: bool,
    /// Unsigned 8-bit field.
    pub u8_value: u8,
    /// Unsigned 16-bit field.
    pub u16_value: u16,
    /// Unsigned 32-bit field.
    pub u32_value: u32,
    /// Unsigned 64-bit field.
    pub u64_value: u64,
    /// Signed 8-bit field.
    pub s8_value: i8,
    /// Signed 16-bit field.
    pub s16_value: i16,
    /// Signed 32-bit field.
    pub s32_value: i32,
    /// Signed 64-bit field.
    pub s64_value: i64,
    /// Single-precision float field (width-exact on the wire).
    pub f32_value: f32,
    /// Double-precision float field.
    pub f64_value: f64,
    /// UTF-8 string field.
    pub string_value: String,
    /// Raw byte-sequence field (bin encoding, not an array).
    pub bytes_value: Vec<u8>,
    /// Nested object field.
    pub object_value: Thing,
}

impl Codec for Required {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_map_header(FIELD_COUNT);
        writer.write_str(field::BOOL_VALUE);
        writer.write_bool(self.bool_value);
        writer.write_str(field::U8_VALUE);
        writer.write_u8(self.u8_value);
        writer.write_str(field::U16_VALUE);
        writer.write_u16(self.u16_value);
        writer.write_str(field::U32_VALUE);
        writer.write_u32(self.u32_value);
        writer.write_str(field::U64_VALUE);
        writer.write_u64(self.u64_value);
        writer.write_str(field::S8_VALUE);
        writer.write_i8(self.s8_value);
        writer.write_str(field::S16_VALUE);
        writer.write_i16(self.s16_value);
        writer.write_str(field::S32_VALUE);
        writer.write_i32(self.s32_value);
        writer.write_str(field::S64_VALUE);
        writer.write_i64(self.s64_value);
        writer.write_str(field::F32_VALUE);
        writer.write_f32(self.f32_value);
        writer.write_str(field::F64_VALUE);
        writer.write_f64(self.f64_value);
        writer.write_str(field::STRING_VALUE);
        writer.write_str(&self.string_value);
        writer.write_str(field::BYTES_VALUE);
        writer.write_bytes(&self.bytes_value);
        writer.write_str(field::OBJECT_VALUE);
        self.object_value.write(writer);
    }

    /// Decode, tolerating both unknown and absent fields.
    ///
    /// A field name not in the catalog is skipped. A declared field absent
    /// from the wire map is left at the zero value of its kind — lenient by
    /// design, matching the deployed boundary-side decoders this suite is
    /// checked against.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::BOOL_VALUE => out.bool_value = decoder.read_bool()?,
                field::U8_VALUE => out.u8_value = decoder.read_u8()?,
                field::U16_VALUE => out.u16_value = decoder.read_u16()?,
                field::U32_VALUE => out.u32_value = decoder.read_u32()?,
                field::U64_VALUE => out.u64_value = decoder.read_u64()?,
                field::S8_VALUE => out.s8_value = decoder.read_i8()?,
                field::S16_VALUE => out.s16_value = decoder.read_i16()?,
                field::S32_VALUE => out.s32_value = decoder.read_i32()?,
                field::S64_VALUE => out.s64_value = decoder.read_i64()?,
                field::F32_VALUE => out.f32_value = decoder.read_f32()?,
                field::F64_VALUE => out.f64_value = decoder.read_f64()?,
                field::STRING_VALUE => out.string_value = decoder.read_str()?,
                field::BYTES_VALUE => out.bytes_value = decoder.read_bytes()?,
                field::OBJECT_VALUE => out.object_value = Thing::decode(decoder)?,
                _ => decoder.skip()?,
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extreme() -> Required {
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

    #[test]
    fn extreme_values_roundtrip() {
        let value = extreme();
        let decoded = Required::from_bytes(&value.to_bytes()).unwrap();
        assert_eq!(decoded, value);
        // Floats must come back bit-exact, not approximately equal.
        assert_eq!(decoded.f32_value.to_bits(), value.f32_value.to_bits());
        assert_eq!(decoded.f64_value.to_bits(), value.f64_value.to_bits());
    }

    #[test]
    fn size_matches_encoded_length() {
        let value = extreme();
        let mut sizer = xcp_msgpack::Sizer::new();
        value.write(&mut sizer);
        assert_eq!(sizer.len(), value.to_bytes().len());
    }

    #[test]
    fn absent_fields_default_to_zero_values() {
        // A producer that only knows two of the fields.
        let bytes = {
            let partial = |w: &mut dyn Writer| {
                w.write_map_header(2);
                w.write_str("u8Value");
                w.write_u8(9);
                w.write_str("stringValue");
                w.write_str("partial");
            };
            let mut sizer = xcp_msgpack::Sizer::new();
            partial(&mut sizer);
            let mut encoder = xcp_msgpack::Encoder::with_capacity(sizer.len());
            partial(&mut encoder);
            encoder.into_bytes()
        };

        let decoded = Required::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.u8_value, 9);
        assert_eq!(decoded.string_value, "partial");
        assert_eq!(decoded.u64_value, 0);
        assert_eq!(decoded.object_value, Thing::default());
    }

    #[test]
    fn truncated_payload_fails_without_partial_value() {
        let bytes = extreme().to_bytes();
        let result = Required::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_tag_fails() {
        // boolValue carrying a string.
        let bad = |w: &mut dyn Writer| {
            w.write_map_header(1);
            w.write_str("boolValue");
            w.write_str("not a bool");
        };
        let mut sizer = xcp_msgpack::Sizer::new();
        bad(&mut sizer);
        let mut encoder = xcp_msgpack::Encoder::with_capacity(sizer.len());
        bad(&mut encoder);

        assert!(matches!(
            Required::from_bytes(&encoder.into_bytes()),
            Err(DecodeError::TypeMismatch { expected: "bool", .. })
        ));
    }
}
