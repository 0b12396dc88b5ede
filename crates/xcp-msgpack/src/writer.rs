//! The write-side seam shared by [`Sizer`](crate::Sizer) and
//! [`Encoder`](crate::Encoder).
//!
//! Record types issue the identical call sequence against both passes, which
//! is what makes the size/encode agreement invariant hold by construction:
//! any divergence between the two implementations of a method is a bug in
//! this crate, not in the schema code driving it.

/// Sink for one value-schema write pass.
///
/// Integer methods take the declared-width type; the wire representation is
/// the smallest that fits the value. Floats are always written at their
/// declared width.
pub trait Writer {
    /// Write a nil marker (absent nullable field or element).
    fn write_nil(&mut self);

    /// Write a boolean.
    fn write_bool(&mut self, value: bool);

    /// Write an unsigned 8-bit integer.
    fn write_u8(&mut self, value: u8) {
        self.write_u64(u64::from(value));
    }

    /// Write an unsigned 16-bit integer.
    fn write_u16(&mut self, value: u16) {
        self.write_u64(u64::from(value));
    }

    /// Write an unsigned 32-bit integer.
    fn write_u32(&mut self, value: u32) {
        self.write_u64(u64::from(value));
    }

    /// Write an unsigned 64-bit integer.
    fn write_u64(&mut self, value: u64);

    /// Write a signed 8-bit integer.
    fn write_i8(&mut self, value: i8) {
        self.write_i64(i64::from(value));
    }

    /// Write a signed 16-bit integer.
    fn write_i16(&mut self, value: i16) {
        self.write_i64(i64::from(value));
    }

    /// Write a signed 32-bit integer.
    fn write_i32(&mut self, value: i32) {
        self.write_i64(i64::from(value));
    }

    /// Write a signed 64-bit integer.
    fn write_i64(&mut self, value: i64);

    /// Write a single-precision float (exact width, never widened).
    fn write_f32(&mut self, value: f32);

    /// Write a double-precision float (exact width).
    fn write_f64(&mut self, value: f64);

    /// Write a length-prefixed UTF-8 string.
    fn write_str(&mut self, value: &str);

    /// Write a length-prefixed raw byte sequence (bin family, not an array).
    fn write_bytes(&mut self, value: &[u8]);

    /// Write a map header carrying the entry count.
    fn write_map_header(&mut self, entries: usize);

    /// Write an array header carrying the element count.
    fn write_array_header(&mut self, elements: usize);
}
