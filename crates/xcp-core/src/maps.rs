//! Keyed mappings exchanged across the boundary.

use std::collections::HashMap;

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

/// Wire field names, declaration order. The spellings are normative for the
/// wire format, historical misspelling included.
mod field {
    pub const MAP_STRING: &str = "mapStringPrimative";
    pub const MAP_U64: &str = "mapU64Primative";
}

const FIELD_COUNT: usize = 2;

/// Two independent mappings from a 32-bit unsigned key.
///
/// Keys are unique per mapping; entry iteration order is not significant and
/// carries no meaning on the wire beyond per-entry correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapValue {
    /// u32 key to string value.
    pub map_strings: HashMap<u32, String>,
    /// u32 key to u64 value.
    pub map_u64s: HashMap<u32, u64>,
}

impl Codec for MapValue {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_map_header(FIELD_COUNT);
        writer.write_str(field::MAP_STRING);
        writer.write_map_header(self.map_strings.len());
        for (key, value) in &self.map_strings {
            writer.write_u32(*key);
            writer.write_str(value);
        }
        writer.write_str(field::MAP_U64);
        writer.write_map_header(self.map_u64s.len());
        for (key, value) in &self.map_u64s {
            writer.write_u32(*key);
            writer.write_u64(*value);
        }
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::MAP_STRING => {
                    let count = decoder.read_map_header()?;
                    let mut map = HashMap::with_capacity(count);
                    for _ in 0..count {
                        let key = decoder.read_u32()?;
                        let value = decoder.read_str()?;
                        map.insert(key, value);
                    }
                    out.map_strings = map;
                }
                field::MAP_U64 => {
                    let count = decoder.read_map_header()?;
                    let mut map = HashMap::with_capacity(count);
                    for _ in 0..count {
                        let key = decoder.read_u32()?;
                        let value = decoder.read_u64()?;
                        map.insert(key, value);
                    }
                    out.map_u64s = map;
                }
                _ => decoder.skip()?,
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_entries_roundtrip_exactly() {
        let mut value = MapValue::default();
        value.map_strings.insert(1234, "test".into());
        value.map_u64s.insert(5678, 1234);

        let decoded = MapValue::from_bytes(&value.to_bytes()).unwrap();
        assert_eq!(decoded.map_strings.len(), 1);
        assert_eq!(decoded.map_strings.get(&1234).map(String::as_str), Some("test"));
        assert_eq!(decoded.map_u64s.len(), 1);
        assert_eq!(decoded.map_u64s.get(&5678), Some(&1234));
    }

    #[test]
    fn empty_maps_roundtrip() {
        let value = MapValue::default();
        assert_eq!(MapValue::from_bytes(&value.to_bytes()).unwrap(), value);
    }

    #[test]
    fn many_entries_roundtrip_regardless_of_order() {
        let mut value = MapValue::default();
        for i in 0..100u32 {
            value.map_strings.insert(i, format!("v{i}"));
            value.map_u64s.insert(i, u64::from(i) * 3);
        }
        assert_eq!(MapValue::from_bytes(&value.to_bytes()).unwrap(), value);
    }
}
