//! The aggregate values exchanged by the round-trip operations.

use xcp_msgpack::{Codec, DecodeError, Decoder, Writer};

use crate::lists::ListValue;
use crate::maps::MapValue;
use crate::optional::Optional;
use crate::required::Required;

/// Wire field names shared by both aggregates, declaration order.
mod field {
    pub const REQUIRED: &str = "required";
    pub const OPTIONAL: &str = "optional";
    pub const MAPS: &str = "maps";
    pub const LISTS: &str = "lists";
}

const FIELD_COUNT: usize = 4;

fn write_parts<W: Writer>(
    writer: &mut W,
    required: &Required,
    optional: &Optional,
    maps: &MapValue,
    lists: &ListValue,
) {
    writer.write_map_header(FIELD_COUNT);
    writer.write_str(field::REQUIRED);
    required.write(writer);
    writer.write_str(field::OPTIONAL);
    optional.write(writer);
    writer.write_str(field::MAPS);
    maps.write(writer);
    writer.write_str(field::LISTS);
    lists.write(writer);
}

/// The unit exchanged by the round-trip operations: one of each record kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestEnvelope {
    /// The non-nullable record.
    pub required: Required,
    /// The nullable record.
    pub optional: Optional,
    /// The keyed mappings.
    pub maps: MapValue,
    /// The ordered sequences.
    pub lists: ListValue,
}

impl TestEnvelope {
    /// Builder: set the non-nullable record.
    #[must_use]
    pub fn with_required(mut self, required: Required) -> Self {
        self.required = required;
        self
    }

    /// Builder: set the nullable record.
    #[must_use]
    pub fn with_optional(mut self, optional: Optional) -> Self {
        self.optional = optional;
        self
    }

    /// Builder: set the keyed mappings.
    #[must_use]
    pub fn with_maps(mut self, maps: MapValue) -> Self {
        self.maps = maps;
        self
    }

    /// Builder: set the ordered sequences.
    #[must_use]
    pub fn with_lists(mut self, lists: ListValue) -> Self {
        self.lists = lists;
        self
    }
}

impl Codec for TestEnvelope {
    fn write<W: Writer>(&self, writer: &mut W) {
        write_parts(writer, &self.required, &self.optional, &self.maps, &self.lists);
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut out = Self::default();
        let entries = decoder.read_map_header()?;
        for _ in 0..entries {
            let name = decoder.read_str()?;
            match name.as_str() {
                field::REQUIRED => out.required = Required::decode(decoder)?,
                field::OPTIONAL => out.optional = Optional::decode(decoder)?,
                field::MAPS => out.maps = MapValue::decode(decoder)?,
                field::LISTS => out.lists = ListValue::decode(decoder)?,
                _ => decoder.skip()?,
            }
        }
        Ok(out)
    }
}

/// The same four parts as [`TestEnvelope`], carried as the request of the
/// argument-style operation: four discrete arguments in one payload map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    /// First argument.
    pub required: Required,
    /// Second argument.
    pub optional: Optional,
    /// Third argument.
    pub maps: MapValue,
    /// Fourth argument.
    pub lists: ListValue,
}

impl From<TestEnvelope> for CallArguments {
    fn from(envelope: TestEnvelope) -> Self {
        Self {
            required: envelope.required,
            optional: envelope.optional,
            maps: envelope.maps,
            lists: envelope.lists,
        }
    }
}

impl From<CallArguments> for TestEnvelope {
    fn from(args: CallArguments) -> Self {
        Self {
            required: args.required,
            optional: args.optional,
            maps: args.maps,
            lists: args.lists,
        }
    }
}

impl Codec for CallArguments {
    fn write<W: Writer>(&self, writer: &mut W) {
        write_parts(writer, &self.required, &self.optional, &self.maps, &self.lists);
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        TestEnvelope::decode(decoder).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thing::Thing;

    #[test]
    fn envelope_roundtrip() {
        let envelope = TestEnvelope::default()
            .with_required(Required {
                u8_value: 7,
                string_value: "test".into(),
                ..Required::default()
            })
            .with_lists(ListValue {
                list_objects_optional: vec![Some(Thing::new("test"))],
                ..ListValue::default()
            });
        assert_eq!(
            TestEnvelope::from_bytes(&envelope.to_bytes()).unwrap(),
            envelope
        );
    }

    #[test]
    fn arguments_and_envelope_share_wire_shape() {
        let envelope = TestEnvelope::default().with_required(Required {
            u16_value: 65535,
            ..Required::default()
        });
        let args = CallArguments::from(envelope.clone());
        assert_eq!(args.to_bytes(), envelope.to_bytes());
        assert_eq!(
            CallArguments::from_bytes(&envelope.to_bytes()).unwrap(),
            args
        );
    }
}
