//! Tolerant-reader decoding.

use crate::error::DecodeError;
use crate::format;

/// Nesting bound for [`Decoder::skip`], so hostile payloads cannot recurse
/// the stack away with deeply nested containers.
const MAX_SKIP_DEPTH: usize = 64;

/// Cursor-based reader over a single wire payload.
///
/// Integer reads accept any integer-family representation and range-check the
/// value into the declared width; float reads require the exact-width marker.
/// Every failure carries the byte offset it occurred at, and no read ever
/// returns a partially consumed value: on error the payload is simply
/// rejected.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True if the whole payload has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn peek(&self) -> Result<u8, DecodeError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: 1,
            })
    }

    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        if count > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: count - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a boolean.
    ///
    /// # Errors
    /// Fails on truncated input or a non-boolean marker.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.pos;
        match self.take_byte()? {
            format::TRUE => Ok(true),
            format::FALSE => Ok(false),
            found => Err(DecodeError::TypeMismatch {
                expected: "bool",
                found,
                offset,
            }),
        }
    }

    /// If the next value is nil, consume it and return `None`; otherwise
    /// decode a present value with `read`.
    ///
    /// # Errors
    /// Propagates any failure from `read`.
    pub fn read_option<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.peek()? == format::NIL {
            self.pos += 1;
            return Ok(None);
        }
        read(self).map(Some)
    }

    fn read_int_any(&mut self, expected: &'static str) -> Result<i128, DecodeError> {
        let offset = self.pos;
        let marker = self.take_byte()?;
        if format::is_positive_fixint(marker) {
            return Ok(i128::from(marker));
        }
        if format::is_negative_fixint(marker) {
            return Ok(i128::from(marker as i8));
        }
        match marker {
            format::UINT8 => Ok(i128::from(self.take_byte()?)),
            format::UINT16 => Ok(i128::from(u16::from_be_bytes(self.take_array()?))),
            format::UINT32 => Ok(i128::from(u32::from_be_bytes(self.take_array()?))),
            format::UINT64 => Ok(i128::from(u64::from_be_bytes(self.take_array()?))),
            format::INT8 => Ok(i128::from(self.take_byte()? as i8)),
            format::INT16 => Ok(i128::from(i16::from_be_bytes(self.take_array()?))),
            format::INT32 => Ok(i128::from(i32::from_be_bytes(self.take_array()?))),
            format::INT64 => Ok(i128::from(i64::from_be_bytes(self.take_array()?))),
            found => Err(DecodeError::TypeMismatch {
                expected,
                found,
                offset,
            }),
        }
    }

    /// Read an unsigned 8-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let value = self.read_int_any("u8")?;
        u8::try_from(value).map_err(|_| DecodeError::IntegerOverflow { value, target: "u8" })
    }

    /// Read an unsigned 16-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let value = self.read_int_any("u16")?;
        u16::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "u16",
        })
    }

    /// Read an unsigned 32-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let value = self.read_int_any("u32")?;
        u32::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "u32",
        })
    }

    /// Read an unsigned 64-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let value = self.read_int_any("u64")?;
        u64::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "u64",
        })
    }

    /// Read a signed 8-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        let value = self.read_int_any("i8")?;
        i8::try_from(value).map_err(|_| DecodeError::IntegerOverflow { value, target: "i8" })
    }

    /// Read a signed 16-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        let value = self.read_int_any("i16")?;
        i16::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "i16",
        })
    }

    /// Read a signed 32-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let value = self.read_int_any("i32")?;
        i32::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "i32",
        })
    }

    /// Read a signed 64-bit integer.
    ///
    /// # Errors
    /// Fails on truncation, a non-integer marker, or an out-of-range value.
    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        let value = self.read_int_any("i64")?;
        i64::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            value,
            target: "i64",
        })
    }

    /// Read a single-precision float. The marker must be width-exact; a
    /// float64 value is never silently narrowed.
    ///
    /// # Errors
    /// Fails on truncation or a non-float32 marker.
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let offset = self.pos;
        match self.take_byte()? {
            format::FLOAT32 => Ok(f32::from_be_bytes(self.take_array()?)),
            found => Err(DecodeError::TypeMismatch {
                expected: "f32",
                found,
                offset,
            }),
        }
    }

    /// Read a double-precision float.
    ///
    /// # Errors
    /// Fails on truncation or a non-float64 marker.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let offset = self.pos;
        match self.take_byte()? {
            format::FLOAT64 => Ok(f64::from_be_bytes(self.take_array()?)),
            found => Err(DecodeError::TypeMismatch {
                expected: "f64",
                found,
                offset,
            }),
        }
    }

    fn read_str_len(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let marker = self.take_byte()?;
        if format::is_fixstr(marker) {
            return Ok(usize::from(marker & 0x1f));
        }
        match marker {
            format::STR8 => Ok(usize::from(self.take_byte()?)),
            format::STR16 => Ok(usize::from(u16::from_be_bytes(self.take_array()?))),
            format::STR32 => Ok(u32::from_be_bytes(self.take_array()?) as usize),
            found => Err(DecodeError::TypeMismatch {
                expected: "string",
                found,
                offset,
            }),
        }
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// # Errors
    /// Fails on truncation, a non-string marker, a length exceeding the
    /// remaining input, or invalid UTF-8.
    pub fn read_str(&mut self) -> Result<String, DecodeError> {
        let len = self.read_str_len()?;
        if len > self.remaining() {
            return Err(DecodeError::LengthOverflow {
                claimed: len,
                remaining: self.remaining(),
            });
        }
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Read a length-prefixed raw byte sequence (bin family).
    ///
    /// # Errors
    /// Fails on truncation, a non-bin marker, or a length exceeding the
    /// remaining input.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let offset = self.pos;
        let marker = self.take_byte()?;
        let len = match marker {
            format::BIN8 => usize::from(self.take_byte()?),
            format::BIN16 => usize::from(u16::from_be_bytes(self.take_array()?)),
            format::BIN32 => u32::from_be_bytes(self.take_array()?) as usize,
            found => {
                return Err(DecodeError::TypeMismatch {
                    expected: "bytes",
                    found,
                    offset,
                });
            }
        };
        if len > self.remaining() {
            return Err(DecodeError::LengthOverflow {
                claimed: len,
                remaining: self.remaining(),
            });
        }
        Ok(self.take(len)?.to_vec())
    }

    /// Read a map header, returning the entry count.
    ///
    /// The count is sanity-checked against the remaining input (each entry
    /// needs at least two bytes), so a hostile header cannot drive
    /// pre-allocation.
    ///
    /// # Errors
    /// Fails on truncation, a non-map marker, or an impossible entry count.
    pub fn read_map_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let marker = self.take_byte()?;
        let entries = if format::is_fixmap(marker) {
            usize::from(marker & 0x0f)
        } else {
            match marker {
                format::MAP16 => usize::from(u16::from_be_bytes(self.take_array()?)),
                format::MAP32 => u32::from_be_bytes(self.take_array()?) as usize,
                found => {
                    return Err(DecodeError::TypeMismatch {
                        expected: "map",
                        found,
                        offset,
                    });
                }
            }
        };
        if entries.saturating_mul(2) > self.remaining() {
            return Err(DecodeError::LengthOverflow {
                claimed: entries,
                remaining: self.remaining(),
            });
        }
        Ok(entries)
    }

    /// Read an array header, returning the element count.
    ///
    /// # Errors
    /// Fails on truncation, a non-array marker, or an impossible element
    /// count.
    pub fn read_array_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let marker = self.take_byte()?;
        let elements = if format::is_fixarray(marker) {
            usize::from(marker & 0x0f)
        } else {
            match marker {
                format::ARRAY16 => usize::from(u16::from_be_bytes(self.take_array()?)),
                format::ARRAY32 => u32::from_be_bytes(self.take_array()?) as usize,
                found => {
                    return Err(DecodeError::TypeMismatch {
                        expected: "array",
                        found,
                        offset,
                    });
                }
            }
        };
        if elements > self.remaining() {
            return Err(DecodeError::LengthOverflow {
                claimed: elements,
                remaining: self.remaining(),
            });
        }
        Ok(elements)
    }

    /// Read and discard one value of any kind, including nested containers
    /// and extension families.
    ///
    /// This is the forward-compatibility primitive: a record decoder that
    /// meets an unrecognized field name skips its value and carries on.
    ///
    /// # Errors
    /// Fails on truncation, a reserved marker, or nesting beyond the depth
    /// limit.
    pub fn skip(&mut self) -> Result<(), DecodeError> {
        self.skip_at_depth(0)
    }

    fn skip_at_depth(&mut self, depth: usize) -> Result<(), DecodeError> {
        if depth >= MAX_SKIP_DEPTH {
            return Err(DecodeError::DepthLimitExceeded {
                max: MAX_SKIP_DEPTH,
            });
        }
        let offset = self.pos;
        let marker = self.take_byte()?;
        if format::is_positive_fixint(marker) || format::is_negative_fixint(marker) {
            return Ok(());
        }
        if format::is_fixstr(marker) {
            self.take(usize::from(marker & 0x1f))?;
            return Ok(());
        }
        if format::is_fixmap(marker) {
            return self.skip_entries(usize::from(marker & 0x0f) * 2, depth);
        }
        if format::is_fixarray(marker) {
            return self.skip_entries(usize::from(marker & 0x0f), depth);
        }
        match marker {
            format::NIL | format::TRUE | format::FALSE => Ok(()),
            format::UINT8 | format::INT8 => self.take(1).map(drop),
            format::UINT16 | format::INT16 => self.take(2).map(drop),
            format::UINT32 | format::INT32 | format::FLOAT32 => self.take(4).map(drop),
            format::UINT64 | format::INT64 | format::FLOAT64 => self.take(8).map(drop),
            format::STR8 | format::BIN8 => {
                let len = usize::from(self.take_byte()?);
                self.take(len).map(drop)
            }
            format::STR16 | format::BIN16 => {
                let len = usize::from(u16::from_be_bytes(self.take_array()?));
                self.take(len).map(drop)
            }
            format::STR32 | format::BIN32 => {
                let len = u32::from_be_bytes(self.take_array()?) as usize;
                self.take(len).map(drop)
            }
            format::FIXEXT1 => self.take(2).map(drop),
            format::FIXEXT2 => self.take(3).map(drop),
            format::FIXEXT4 => self.take(5).map(drop),
            format::FIXEXT8 => self.take(9).map(drop),
            format::FIXEXT16 => self.take(17).map(drop),
            format::EXT8 => {
                let len = usize::from(self.take_byte()?);
                self.take(1 + len).map(drop)
            }
            format::EXT16 => {
                let len = usize::from(u16::from_be_bytes(self.take_array()?));
                self.take(1 + len).map(drop)
            }
            format::EXT32 => {
                let len = u32::from_be_bytes(self.take_array()?) as usize;
                self.take(1 + len).map(drop)
            }
            format::MAP16 => {
                let entries = usize::from(u16::from_be_bytes(self.take_array()?));
                self.skip_entries(entries * 2, depth)
            }
            format::MAP32 => {
                let entries = u32::from_be_bytes(self.take_array()?) as usize;
                self.skip_entries(entries.saturating_mul(2), depth)
            }
            format::ARRAY16 => {
                let elements = usize::from(u16::from_be_bytes(self.take_array()?));
                self.skip_entries(elements, depth)
            }
            format::ARRAY32 => {
                let elements = u32::from_be_bytes(self.take_array()?) as usize;
                self.skip_entries(elements, depth)
            }
            found => Err(DecodeError::TypeMismatch {
                expected: "any value",
                found,
                offset,
            }),
        }
    }

    fn skip_entries(&mut self, count: usize, depth: usize) -> Result<(), DecodeError> {
        for _ in 0..count {
            self.skip_at_depth(depth + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::writer::Writer;

    fn encoded(write: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut encoder = Encoder::with_capacity(64);
        write(&mut encoder);
        encoder.into_bytes()
    }

    #[test]
    fn reads_integers_across_family_formats() {
        // Positive fixint into every unsigned width.
        let bytes = [0x05];
        assert_eq!(Decoder::new(&bytes).read_u8().unwrap(), 5);
        assert_eq!(Decoder::new(&bytes).read_u64().unwrap(), 5);
        assert_eq!(Decoder::new(&bytes).read_i32().unwrap(), 5);

        // uint8 format into a u64 field.
        let bytes = [0xcc, 0xff];
        assert_eq!(Decoder::new(&bytes).read_u64().unwrap(), 255);

        // int16 format holding a small value into a u8 field.
        let bytes = [0xd1, 0x00, 0x64];
        assert_eq!(Decoder::new(&bytes).read_u8().unwrap(), 100);

        // Negative fixint into signed widths.
        let bytes = [0xe0];
        assert_eq!(Decoder::new(&bytes).read_i8().unwrap(), -32);
        assert_eq!(Decoder::new(&bytes).read_i64().unwrap(), -32);
    }

    #[test]
    fn range_checks_into_declared_width() {
        let bytes = encoded(|e| e.write_u16(256));
        assert_eq!(
            Decoder::new(&bytes).read_u8(),
            Err(DecodeError::IntegerOverflow {
                value: 256,
                target: "u8"
            })
        );

        let bytes = encoded(|e| e.write_i64(-1));
        assert_eq!(
            Decoder::new(&bytes).read_u64(),
            Err(DecodeError::IntegerOverflow {
                value: -1,
                target: "u64"
            })
        );

        let bytes = encoded(|e| e.write_u64(u64::MAX));
        assert_eq!(
            Decoder::new(&bytes).read_i64(),
            Err(DecodeError::IntegerOverflow {
                value: i128::from(u64::MAX),
                target: "i64"
            })
        );
    }

    #[test]
    fn float_markers_are_width_strict() {
        let bytes = encoded(|e| e.write_f64(1.0));
        assert!(matches!(
            Decoder::new(&bytes).read_f32(),
            Err(DecodeError::TypeMismatch {
                expected: "f32",
                ..
            })
        ));

        let bytes = encoded(|e| e.write_f32(1.0));
        assert!(matches!(
            Decoder::new(&bytes).read_f64(),
            Err(DecodeError::TypeMismatch {
                expected: "f64",
                ..
            })
        ));
    }

    #[test]
    fn truncated_input_reports_offset() {
        let bytes = [0xcd, 0xff];
        assert_eq!(
            Decoder::new(&bytes).read_u16(),
            Err(DecodeError::UnexpectedEof {
                offset: 1,
                needed: 1
            })
        );
    }

    #[test]
    fn string_roundtrip_and_utf8_rejection() {
        let bytes = encoded(|e| e.write_str("test"));
        assert_eq!(Decoder::new(&bytes).read_str().unwrap(), "test");

        let bytes = [0xa2, 0xff, 0xfe];
        assert_eq!(
            Decoder::new(&bytes).read_str(),
            Err(DecodeError::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn hostile_length_headers_are_rejected() {
        // str32 claiming 4 GiB.
        let bytes = [0xdb, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(
            Decoder::new(&bytes).read_str(),
            Err(DecodeError::LengthOverflow { .. })
        ));

        // map16 claiming more entries than bytes remain.
        let bytes = [0xde, 0xff, 0xff, 0x00];
        assert!(matches!(
            Decoder::new(&bytes).read_map_header(),
            Err(DecodeError::LengthOverflow { .. })
        ));

        // array32 claiming u32::MAX elements.
        let bytes = [0xdd, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(
            Decoder::new(&bytes).read_array_header(),
            Err(DecodeError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn read_option_distinguishes_nil_from_present() {
        let bytes = [0xc0];
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_option(Decoder::read_u8).unwrap(), None);
        assert!(decoder.is_exhausted());

        let bytes = encoded(|e| e.write_u8(0));
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_option(Decoder::read_u8).unwrap(), Some(0));
    }

    #[test]
    fn skip_discards_any_value_shape() {
        let bytes = encoded(|e| {
            // A nested container an older decoder would not recognize.
            e.write_map_header(2);
            e.write_str("newField");
            e.write_array_header(3);
            e.write_u64(1);
            e.write_nil();
            e.write_str("x");
            e.write_str("newBytes");
            e.write_bytes(b"abc");
            // Trailing sentinel proves the cursor lands correctly.
            e.write_u8(42);
        });
        let mut decoder = Decoder::new(&bytes);
        decoder.skip().unwrap();
        assert_eq!(decoder.read_u8().unwrap(), 42);
        assert!(decoder.is_exhausted());
    }

    #[test]
    fn skip_handles_extension_families() {
        // fixext4 (timestamp-style): marker, type, 4 data bytes.
        let bytes = [0xd6, 0xff, 0x00, 0x00, 0x00, 0x01, 0x2a];
        let mut decoder = Decoder::new(&bytes);
        decoder.skip().unwrap();
        assert_eq!(decoder.read_u8().unwrap(), 42);
    }

    #[test]
    fn skip_enforces_depth_limit() {
        // 65 nested single-element arrays.
        let mut bytes = vec![0x91; 65];
        bytes.push(0x01);
        assert_eq!(
            Decoder::new(&bytes).skip(),
            Err(DecodeError::DepthLimitExceeded { max: 64 })
        );
    }
}
