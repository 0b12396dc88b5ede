//! Ordered sequences exchanged across the boundary.

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

use crate::thing::Thing;

/// Wire field names, declaration order.
mod field {
    pub const LIST_STRINGS: &str = "listStrings";
    pub const LIST_U64S: &str = "listU64s";
    pub const LIST_OBJECTS: &str = "listObjects";
    pub const LIST_OBJECTS_OPTIONAL: &str = "listObjectsOptional";
}

const FIELD_COUNT: usize = 4;

/// Four independent sequences; order is significant and preserved exactly.
///
/// The nullable-object sequence writes a nil marker per absent element, so
/// the array header always carries the exact element count — nulls never
/// shorten a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListValue {
    /// Sequence of strings.
    pub list_strings: Vec<String>,
    /// Sequence of 64-bit unsigned integers.
    pub list_u64s: Vec<u64>,
    /// Sequence of non-nullable nested objects.
    pub list_objects: Vec<Thing>,
    /// Sequence of nullable nested objects.
    pub list_objects_optional: Vec<Option<Thing>>,
}

impl Codec for ListValue {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_map_header(FIELD_COUNT);
        writer.write_str(field::LIST_STRINGS);
        writer.write_array_header(self.list_strings.len());
        for item in &self.list_strings {
            writer.write_str(item);
        }
        writer.write_str(field::LIST_U64S);
        writer.write_array_header(self.list_u64s.len());
        for item in &self.list_u64s {
            writer.write_u64(*item);
        }
        writer.write_str(field::LIST_OBJECTS);
        writer.write_array_header(self.list_objects.len());
        for item in &self.list_objects {
            item.write(writer);
        }
        writer.write_str(field::LIST_OBJECTS_OPTIONAL);
        writer.write_array_header(self.list_objects_optional.len());
        for item in &self.list_objects_optional {
            match item {
                Some(thing) => thing.write(writer),
                None => writer.write_nil(),
            }
        }
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::LIST_STRINGS => {
                    let count = decoder.read_array_header()?;
                    let mut list = Vec::with_capacity(count);
                    for _ in 0..count {
                        list.push(decoder.read_str()?);
                    }
                    out.list_strings = list;
                }
                field::LIST_U64S => {
                    let count = decoder.read_array_header()?;
                    let mut list = Vec::with_capacity(count);
                    for _ in 0..count {
                        list.push(decoder.read_u64()?);
                    }
                    out.list_u64s = list;
                }
                field::LIST_OBJECTS => {
                    let count = decoder.read_array_header()?;
                    let mut list = Vec::with_capacity(count);
                    for _ in 0..count {
                        list.push(Thing::decode(decoder)?);
                    }
                    out.list_objects = list;
                }
                field::LIST_OBJECTS_OPTIONAL => {
                    let count = decoder.read_array_header()?;
                    let mut list = Vec::with_capacity(count);
                    for _ in 0..count {
                        list.push(decoder.read_option(Thing::decode)?);
                    }
                    out.list_objects_optional = list;
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
    fn populated_lists_roundtrip_in_order() {
        let value = ListValue {
            list_strings: vec!["a".into(), "b".into(), "c".into()],
            list_u64s: vec![1234, 0, u64::MAX],
            list_objects: vec![Thing::new("x"), Thing::new("y")],
            list_objects_optional: vec![Some(Thing::new("test"))],
        };
        assert_eq!(ListValue::from_bytes(&value.to_bytes()).unwrap(), value);
    }

    #[test]
    fn nullable_elements_keep_their_positions() {
        let value = ListValue {
            list_objects_optional: vec![None, Some(Thing::new("mid")), None],
            ..ListValue::default()
        };
        let decoded = ListValue::from_bytes(&value.to_bytes()).unwrap();
        assert_eq!(decoded.list_objects_optional.len(), 3);
        assert_eq!(decoded.list_objects_optional[0], None);
        assert_eq!(decoded.list_objects_optional[1], Some(Thing::new("mid")));
        assert_eq!(decoded.list_objects_optional[2], None);
    }

    #[test]
    fn empty_lists_roundtrip() {
        let value = ListValue::default();
        assert_eq!(ListValue::from_bytes(&value.to_bytes()).unwrap(), value);
    }
}
