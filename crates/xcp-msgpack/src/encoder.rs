//! Wire-byte production.

use crate::format;
use crate::writer::Writer;

/// Writes a value's exact wire bytes into a buffer reserved up front.
///
/// Construct with [`Encoder::with_capacity`] using a length computed by
/// [`Sizer`](crate::Sizer), drive it with the identical write sequence, and
/// take the finished payload with [`Encoder::into_bytes`]. The format
/// thresholds here mirror the sizer's arm for arm; the two passes must never
/// disagree on a single byte.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create an encoder whose buffer is reserved to `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the encoder, yielding the finished payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}

impl Writer for Encoder {
    fn write_nil(&mut self) {
        self.push(format::NIL);
    }

    fn write_bool(&mut self, value: bool) {
        self.push(if value { format::TRUE } else { format::FALSE });
    }

    fn write_u64(&mut self, value: u64) {
        match value {
            v if v <= u64::from(format::POSITIVE_FIXINT_MAX) => {
                self.push(v as u8);
            }
            v if v <= u64::from(u8::MAX) => {
                self.push(format::UINT8);
                self.push(v as u8);
            }
            v if v <= u64::from(u16::MAX) => {
                self.push(format::UINT16);
                self.extend(&(v as u16).to_be_bytes());
            }
            v if v <= u64::from(u32::MAX) => {
                self.push(format::UINT32);
                self.extend(&(v as u32).to_be_bytes());
            }
            v => {
                self.push(format::UINT64);
                self.extend(&v.to_be_bytes());
            }
        }
    }

    fn write_i64(&mut self, value: i64) {
        if value >= 0 {
            match value {
                v if v <= i64::from(format::POSITIVE_FIXINT_MAX) => {
                    self.push(v as u8);
                }
                v if v <= i64::from(i16::MAX) => {
                    self.push(format::INT16);
                    self.extend(&(v as i16).to_be_bytes());
                }
                v if v <= i64::from(i32::MAX) => {
                    self.push(format::INT32);
                    self.extend(&(v as i32).to_be_bytes());
                }
                v => {
                    self.push(format::INT64);
                    self.extend(&v.to_be_bytes());
                }
            }
        } else {
            match value {
                v if v >= format::NEGATIVE_FIXINT_FLOOR => {
                    self.push(v as u8);
                }
                v if v >= i64::from(i8::MIN) => {
                    self.push(format::INT8);
                    self.push(v as u8);
                }
                v if v >= i64::from(i16::MIN) => {
                    self.push(format::INT16);
                    self.extend(&(v as i16).to_be_bytes());
                }
                v if v >= i64::from(i32::MIN) => {
                    self.push(format::INT32);
                    self.extend(&(v as i32).to_be_bytes());
                }
                v => {
                    self.push(format::INT64);
                    self.extend(&v.to_be_bytes());
                }
            }
        }
    }

    fn write_f32(&mut self, value: f32) {
        self.push(format::FLOAT32);
        self.extend(&value.to_be_bytes());
    }

    fn write_f64(&mut self, value: f64) {
        self.push(format::FLOAT64);
        self.extend(&value.to_be_bytes());
    }

    fn write_str(&mut self, value: &str) {
        let len = value.len();
        match len {
            l if l <= format::FIXSTR_MAX => {
                self.push(format::FIXSTR_BASE | l as u8);
            }
            l if l <= u8::MAX as usize => {
                self.push(format::STR8);
                self.push(l as u8);
            }
            l if l <= u16::MAX as usize => {
                self.push(format::STR16);
                self.extend(&(l as u16).to_be_bytes());
            }
            l => {
                self.push(format::STR32);
                self.extend(&(l as u32).to_be_bytes());
            }
        }
        self.extend(value.as_bytes());
    }

    fn write_bytes(&mut self, value: &[u8]) {
        let len = value.len();
        match len {
            l if l <= u8::MAX as usize => {
                self.push(format::BIN8);
                self.push(l as u8);
            }
            l if l <= u16::MAX as usize => {
                self.push(format::BIN16);
                self.extend(&(l as u16).to_be_bytes());
            }
            l => {
                self.push(format::BIN32);
                self.extend(&(l as u32).to_be_bytes());
            }
        }
        self.extend(value);
    }

    fn write_map_header(&mut self, entries: usize) {
        match entries {
            e if e <= format::FIX_CONTAINER_MAX => {
                self.push(format::FIXMAP_BASE | e as u8);
            }
            e if e <= u16::MAX as usize => {
                self.push(format::MAP16);
                self.extend(&(e as u16).to_be_bytes());
            }
            e => {
                self.push(format::MAP32);
                self.extend(&(e as u32).to_be_bytes());
            }
        }
    }

    fn write_array_header(&mut self, elements: usize) {
        match elements {
            e if e <= format::FIX_CONTAINER_MAX => {
                self.push(format::FIXARRAY_BASE | e as u8);
            }
            e if e <= u16::MAX as usize => {
                self.push(format::ARRAY16);
                self.extend(&(e as u16).to_be_bytes());
            }
            e => {
                self.push(format::ARRAY32);
                self.extend(&(e as u32).to_be_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(write: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut encoder = Encoder::with_capacity(64);
        write(&mut encoder);
        encoder.into_bytes()
    }

    #[test]
    fn nil_and_bool_markers() {
        assert_eq!(encoded(Writer::write_nil), vec![0xc0]);
        assert_eq!(encoded(|e| e.write_bool(true)), vec![0xc3]);
        assert_eq!(encoded(|e| e.write_bool(false)), vec![0xc2]);
    }

    #[test]
    fn unsigned_magnitude_selects_format() {
        assert_eq!(encoded(|e| e.write_u64(0x7f)), vec![0x7f]);
        assert_eq!(encoded(|e| e.write_u8(0xff)), vec![0xcc, 0xff]);
        assert_eq!(encoded(|e| e.write_u16(0xffff)), vec![0xcd, 0xff, 0xff]);
        assert_eq!(
            encoded(|e| e.write_u32(u32::MAX)),
            vec![0xce, 0xff, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            encoded(|e| e.write_u64(u64::MAX)),
            vec![0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn signed_magnitude_selects_format() {
        assert_eq!(encoded(|e| e.write_i64(-1)), vec![0xff]);
        assert_eq!(encoded(|e| e.write_i64(-32)), vec![0xe0]);
        assert_eq!(encoded(|e| e.write_i8(i8::MIN)), vec![0xd0, 0x80]);
        assert_eq!(encoded(|e| e.write_i16(i16::MIN)), vec![0xd1, 0x80, 0x00]);
        assert_eq!(
            encoded(|e| e.write_i32(i32::MIN)),
            vec![0xd2, 0x80, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            encoded(|e| e.write_i64(i64::MIN)),
            vec![0xd3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        // Positive values that overflow i8 go straight to int16.
        assert_eq!(encoded(|e| e.write_i64(200)), vec![0xd1, 0x00, 0xc8]);
    }

    #[test]
    fn floats_are_width_exact() {
        assert_eq!(
            encoded(|e| e.write_f32(1.0)),
            vec![0xca, 0x3f, 0x80, 0x00, 0x00]
        );
        let mut expected = vec![0xcb];
        expected.extend_from_slice(&1.0_f64.to_be_bytes());
        assert_eq!(encoded(|e| e.write_f64(1.0)), expected);
    }

    #[test]
    fn string_and_bytes_prefixes() {
        assert_eq!(
            encoded(|e| e.write_str("test")),
            vec![0xa4, b't', b'e', b's', b't']
        );
        assert_eq!(
            encoded(|e| e.write_bytes(b"test")),
            vec![0xc4, 0x04, b't', b'e', b's', b't']
        );
    }

    #[test]
    fn container_headers() {
        assert_eq!(encoded(|e| e.write_map_header(14)), vec![0x8e]);
        assert_eq!(encoded(|e| e.write_map_header(16)), vec![0xde, 0x00, 0x10]);
        assert_eq!(encoded(|e| e.write_array_header(4)), vec![0x94]);
        assert_eq!(
            encoded(|e| e.write_array_header(65536)),
            vec![0xdd, 0x00, 0x01, 0x00, 0x00]
        );
    }
}
