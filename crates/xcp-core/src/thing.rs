//! The nested object used recursively by the other records.

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

/// Wire field names, declaration order.
mod field {
    pub const VALUE: &str = "value";
}

const FIELD_COUNT: usize = 1;

/// Single-field nested object, embedded in [`Required`](crate::Required),
/// [`Optional`](crate::Optional), and [`ListValue`](crate::ListValue).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thing {
    /// The carried string.
    pub value: String,
}

impl Thing {
    /// Construct a `Thing` holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Codec for Thing {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_map_header(FIELD_COUNT);
        writer.write_str(field::VALUE);
        writer.write_str(&self.value);
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::VALUE => out.value = decoder.read_str()?,
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
    fn roundtrip() {
        let thing = Thing::new("test");
        assert_eq!(Thing::from_bytes(&thing.to_bytes()).unwrap(), thing);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let mut sizer = xcp_msgpack::Sizer::new();
        write_with_extra(&mut sizer);
        let mut encoder = xcp_msgpack::Encoder::with_capacity(sizer.len());
        write_with_extra(&mut encoder);

        let decoded = Thing::from_bytes(&encoder.into_bytes()).unwrap();
        assert_eq!(decoded, Thing::new("test"));
    }

    fn write_with_extra<W: Writer>(writer: &mut W) {
        writer.write_map_header(2);
        writer.write_str("value");
        writer.write_str("test");
        writer.write_str("addedLater");
        writer.write_u64(7);
    }
}
