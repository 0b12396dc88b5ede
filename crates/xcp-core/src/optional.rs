//! The all-fields-nullable counterpart of [`Required`](crate::Required).

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

use crate::thing::Thing;

/// Wire field names, declaration order (same catalog as `Required`).
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

/// Record whose every field is nullable.
///
/// Null is a first-class wire value: every field name is still written, with
/// a nil marker standing in for an absent value. A present zero or empty
/// value is therefore always distinguishable from null. The byte-sequence
/// field models absence as `Option<Vec<u8>>` rather than a null scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optional {
    /// Nullable boolean.
    pub bool_value: Option<bool>,
    /// Nullable unsigned 8-bit integer.
    pub u8_value: Option<u8>,
    /// Nullable unsigned 16-bit integer.
    pub u16_value: Option<u16>,
    /// Nullable unsigned 32-bit integer.
    pub u32_value: Option<u32>,
    /// Nullable unsigned 64-bit integer.
    pub u64_value: Option<u64>,
    /// Nullable signed 8-bit integer.
    pub s8_value: Option<i8>,
    /// Nullable signed 16-bit integer.
    pub s16_value: Option<i16>,
    /// Nullable signed 32-bit integer.
    pub s32_value: Option<i32>,
    /// Nullable signed 64-bit integer.
    pub s64_value: Option<i64>,
    /// Nullable single-precision float.
    pub f32_value: Option<f32>,
    /// Nullable double-precision float.
    pub f64_value: Option<f64>,
    /// Nullable string.
    pub string_value: Option<String>,
    /// Absent-vs-present byte sequence.
    pub bytes_value: Option<Vec<u8>>,
    /// Nullable nested object.
    pub object_value: Option<Thing>,
}

fn write_opt<W: Writer, T>(writer: &mut W, value: Option<&T>, present: impl FnOnce(&mut W, &T)) {
    match value {
        Some(v) => present(writer, v),
        None => writer.write_nil(),
    }
}

impl Codec for Optional {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_map_header(FIELD_COUNT);
        writer.write_str(field::BOOL_VALUE);
        write_opt(writer, self.bool_value.as_ref(), |w, v| w.write_bool(*v));
        writer.write_str(field::U8_VALUE);
        write_opt(writer, self.u8_value.as_ref(), |w, v| w.write_u8(*v));
        writer.write_str(field::U16_VALUE);
        write_opt(writer, self.u16_value.as_ref(), |w, v| w.write_u16(*v));
        writer.write_str(field::U32_VALUE);
        write_opt(writer, self.u32_value.as_ref(), |w, v| w.write_u32(*v));
        writer.write_str(field::U64_VALUE);
        write_opt(writer, self.u64_value.as_ref(), |w, v| w.write_u64(*v));
        writer.write_str(field::S8_VALUE);
        write_opt(writer, self.s8_value.as_ref(), |w, v| w.write_i8(*v));
        writer.write_str(field::S16_VALUE);
        write_opt(writer, self.s16_value.as_ref(), |w, v| w.write_i16(*v));
        writer.write_str(field::S32_VALUE);
        write_opt(writer, self.s32_value.as_ref(), |w, v| w.write_i32(*v));
        writer.write_str(field::S64_VALUE);
        write_opt(writer, self.s64_value.as_ref(), |w, v| w.write_i64(*v));
        writer.write_str(field::F32_VALUE);
        write_opt(writer, self.f32_value.as_ref(), |w, v| w.write_f32(*v));
        writer.write_str(field::F64_VALUE);
        write_opt(writer, self.f64_value.as_ref(), |w, v| w.write_f64(*v));
        writer.write_str(field::STRING_VALUE);
        write_opt(writer, self.string_value.as_ref(), |w, v| w.write_str(v));
        writer.write_str(field::BYTES_VALUE);
        write_opt(writer, self.bytes_value.as_ref(), |w, v| w.write_bytes(v));
        writer.write_str(field::OBJECT_VALUE);
        write_opt(writer, self.object_value.as_ref(), |w, v| v.write(w));
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::BOOL_VALUE => out.bool_value = decoder.read_option(Decoder::read_bool)?,
                field::U8_VALUE => out.u8_value = decoder.read_option(Decoder::read_u8)?,
                field::U16_VALUE => out.u16_value = decoder.read_option(Decoder::read_u16)?,
                field::U32_VALUE => out.u32_value = decoder.read_option(Decoder::read_u32)?,
                field::U64_VALUE => out.u64_value = decoder.read_option(Decoder::read_u64)?,
                field::S8_VALUE => out.s8_value = decoder.read_option(Decoder::read_i8)?,
                field::S16_VALUE => out.s16_value = decoder.read_option(Decoder::read_i16)?,
                field::S32_VALUE => out.s32_value = decoder.read_option(Decoder::read_i32)?,
                field::S64_VALUE => out.s64_value = decoder.read_option(Decoder::read_i64)?,
                field::F32_VALUE => out.f32_value = decoder.read_option(Decoder::read_f32)?,
                field::F64_VALUE => out.f64_value = decoder.read_option(Decoder::read_f64)?,
                field::STRING_VALUE => {
                    out.string_value = decoder.read_option(Decoder::read_str)?;
                }
                field::BYTES_VALUE => {
                    out.bytes_value = decoder.read_option(Decoder::read_bytes)?;
                }
                field::OBJECT_VALUE => {
                    out.object_value = decoder.read_option(Thing::decode)?;
                }
                _ => decoder.skip()?,
            }
        }
        Ok(out)
    }
}
