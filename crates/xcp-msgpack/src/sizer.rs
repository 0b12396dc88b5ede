//! Exact encoded-length computation.

use crate::format;
use crate::writer::Writer;

/// Computes the exact byte length a value will occupy on the wire, without
/// allocating or producing that encoding.
///
/// Drive it with the same write sequence as the [`Encoder`](crate::Encoder);
/// [`Sizer::len`] then equals the encoded byte length exactly. The execution
/// environments on the far side of the call boundary cannot grow buffers
/// cheaply, so every payload is sized before a single byte is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sizer {
    length: usize,
}

impl Sizer {
    /// Create a sizer with zero accumulated length.
    #[must_use]
    pub const fn new() -> Self {
        Self { length: 0 }
    }

    /// Accumulated encoded length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// True if nothing has been sized yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    fn add(&mut self, bytes: usize) {
        self.length += bytes;
    }
}

impl Writer for Sizer {
    fn write_nil(&mut self) {
        self.add(1);
    }

    fn write_bool(&mut self, _value: bool) {
        self.add(1);
    }

    fn write_u64(&mut self, value: u64) {
        let bytes = match value {
            v if v <= u64::from(format::POSITIVE_FIXINT_MAX) => 1,
            v if v <= u64::from(u8::MAX) => 2,
            v if v <= u64::from(u16::MAX) => 3,
            v if v <= u64::from(u32::MAX) => 5,
            _ => 9,
        };
        self.add(bytes);
    }

    fn write_i64(&mut self, value: i64) {
        let bytes = if value >= 0 {
            match value {
                v if v <= i64::from(format::POSITIVE_FIXINT_MAX) => 1,
                v if v <= i64::from(i16::MAX) => 3,
                v if v <= i64::from(i32::MAX) => 5,
                _ => 9,
            }
        } else {
            match value {
                v if v >= format::NEGATIVE_FIXINT_FLOOR => 1,
                v if v >= i64::from(i8::MIN) => 2,
                v if v >= i64::from(i16::MIN) => 3,
                v if v >= i64::from(i32::MIN) => 5,
                _ => 9,
            }
        };
        self.add(bytes);
    }

    fn write_f32(&mut self, _value: f32) {
        self.add(5);
    }

    fn write_f64(&mut self, _value: f64) {
        self.add(9);
    }

    fn write_str(&mut self, value: &str) {
        let len = value.len();
        let header = match len {
            l if l <= format::FIXSTR_MAX => 1,
            l if l <= u8::MAX as usize => 2,
            l if l <= u16::MAX as usize => 3,
            _ => 5,
        };
        self.add(header + len);
    }

    fn write_bytes(&mut self, value: &[u8]) {
        let len = value.len();
        let header = match len {
            l if l <= u8::MAX as usize => 2,
            l if l <= u16::MAX as usize => 3,
            _ => 5,
        };
        self.add(header + len);
    }

    fn write_map_header(&mut self, entries: usize) {
        let bytes = match entries {
            e if e <= format::FIX_CONTAINER_MAX => 1,
            e if e <= u16::MAX as usize => 3,
            _ => 5,
        };
        self.add(bytes);
    }

    fn write_array_header(&mut self, elements: usize) {
        let bytes = match elements {
            e if e <= format::FIX_CONTAINER_MAX => 1,
            e if e <= u16::MAX as usize => 3,
            _ => 5,
        };
        self.add(bytes);
    }
}
