//! Decodes the IPP wire format into a [`Message`] (§4.4).
//!
//! Grounded on the teacher's `decoder/ifd.rs` (reads overlapping tag/type/count/offset-or-inline
//! records) and `decoder/stream.rs`. The collection sub-grammar itself has no TIFF counterpart
//! (TIFF's SubIFD is a pointer, not an inline nested grammar); it follows this spec's own state
//! machine description directly.

use std::io::Read;

use crate::error::{IppError, IppFormatError, IppResult};
use crate::model::{Attribute, Group, Message};
use crate::reader::Reader;
use crate::tag::Tag;
use crate::value::Value;

/// Collection nesting depth bound (§5, §9). Exceeding it is a decode error, not a panic.
const MAX_COLLECTION_DEPTH: u32 = 32;

/// The decoder's sole input-side knob (§4.4).
#[derive(Clone, Copy, Debug)]
pub struct DecodeOptions {
    /// Accept collection members that omit an explicit `TagMemberName` marker, adopting the
    /// member's own attribute name instead (a known device violation).
    pub enable_workarounds: bool,
}

impl Default for DecodeOptions {
    fn default() -> DecodeOptions {
        DecodeOptions {
            enable_workarounds: false,
        }
    }
}

/// Decodes a complete message from `source`.
pub fn decode<R: Read>(source: R, options: &DecodeOptions) -> IppResult<Message> {
    let mut reader = Reader::new(source);

    let version_major = reader.read_u8()?;
    let version_minor = reader.read_u8()?;
    let code = reader.read_u16()?;
    let request_id = reader.read_u32()?;

    let mut message = Message {
        version_major,
        version_minor,
        code,
        request_id,
        groups: Vec::new(),
    };
    let mut current_group: Option<usize> = None;
    let mut previous: Option<usize> = None;

    loop {
        let record_offset = reader.offset();
        let outcome: IppResult<bool> = (|| {
            let tag = Tag::from_u8(reader.read_u8()?);

            if tag == Tag::Zero {
                return Err(IppFormatError::InvalidZeroTag.into());
            }
            if tag == Tag::End {
                return Ok(false);
            }
            if tag.is_group() {
                message.groups.push(Group::new(tag, Vec::new()));
                current_group = Some(message.groups.len() - 1);
                previous = None;
                return Ok(true);
            }
            if matches!(tag, Tag::MemberName | Tag::EndCollection) {
                return Err(IppFormatError::MemberTagOutsideCollection.into());
            }

            let name_bytes = reader.read_counted_bytes()?;
            let value_bytes = reader.read_counted_bytes()?;
            let value = decode_value(&mut reader, options, 0, tag, value_bytes)?;
            let name =
                String::from_utf8(name_bytes).map_err(|_| IppFormatError::InvalidUtf8)?;

            if !name.is_empty() {
                let group_idx = current_group.ok_or(IppFormatError::AttributeWithoutGroup)?;
                let attrs = message.groups[group_idx].attrs.as_mut().unwrap();
                attrs.push(Attribute {
                    name,
                    values: vec![(tag, value)],
                });
                previous = Some(attrs.len() - 1);
            } else {
                let group_idx =
                    current_group.ok_or(IppFormatError::AdditionalValueWithoutAttribute)?;
                let attr_idx =
                    previous.ok_or(IppFormatError::AdditionalValueWithoutAttribute)?;
                message.groups[group_idx].attrs.as_mut().unwrap()[attr_idx]
                    .values
                    .push((tag, value));
            }
            Ok(true)
        })();

        match outcome {
            Ok(true) => continue,
            Ok(false) => return Ok(message),
            Err(e) => return Err(e.with_offset(record_offset)),
        }
    }
}

/// Decodes a single attribute record's value, recursing into the collection sub-parser for
/// `BeginCollection` and validating the extension-tag's embedded 32-bit tag for `Extension`.
fn decode_value<R: Read>(
    reader: &mut Reader<R>,
    options: &DecodeOptions,
    depth: u32,
    tag: Tag,
    value_bytes: Vec<u8>,
) -> IppResult<Value> {
    if tag == Tag::Extension {
        if value_bytes.len() < 4 {
            return Err(IppFormatError::ExtensionTagTooShort.into());
        }
        let embedded = u32::from_be_bytes([value_bytes[0], value_bytes[1], value_bytes[2], value_bytes[3]]);
        if embedded > 0x7fffffff {
            return Err(IppFormatError::ExtensionTagOutOfRange(embedded).into());
        }
        Ok(Value::Binary(value_bytes))
    } else if tag == Tag::BeginCollection {
        let members = parse_collection_body(reader, options, depth + 1)?;
        Ok(Value::Collection(members))
    } else {
        Value::decode_bytes(tag, &value_bytes)
    }
}

/// Parses a collection body (the sequence of nameless attribute records between a
/// `BeginCollection` placeholder and its matching `EndCollection`), per §4.4.
fn parse_collection_body<R: Read>(
    reader: &mut Reader<R>,
    options: &DecodeOptions,
    depth: u32,
) -> IppResult<Vec<Attribute>> {
    if depth > MAX_COLLECTION_DEPTH {
        return Err(IppError::LimitsExceeded { offset: None });
    }

    let mut members: Vec<Attribute> = Vec::new();
    let mut member_name: Option<String> = None;

    loop {
        let tag = Tag::from_u8(reader.read_u8()?);
        if tag.is_delimiter() {
            return Err(IppFormatError::DelimiterInsideCollection.into());
        }

        let name_bytes = reader.read_counted_bytes()?;
        let value_bytes = reader.read_counted_bytes()?;

        if tag == Tag::EndCollection {
            return Ok(members);
        }

        if tag == Tag::MemberName {
            if value_bytes.is_empty() || member_name.is_some() {
                return Err(IppFormatError::InvalidMemberName.into());
            }
            member_name =
                Some(String::from_utf8(value_bytes).map_err(|_| IppFormatError::InvalidUtf8)?);
            continue;
        }

        let value = decode_value(reader, options, depth, tag, value_bytes)?;

        if let Some(name) = member_name.take() {
            members.push(Attribute {
                name,
                values: vec![(tag, value)],
            });
        } else if let Some(last) = members.last_mut() {
            last.values.push((tag, value));
        } else if options.enable_workarounds {
            let name = String::from_utf8(name_bytes).map_err(|_| IppFormatError::InvalidUtf8)?;
            if name.is_empty() {
                return Err(IppFormatError::MemberWithoutName.into());
            }
            members.push(Attribute {
                name,
                values: vec![(tag, value)],
            });
        } else {
            return Err(IppFormatError::MemberWithoutName.into());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encoder::encode_to_bytes;
    use crate::model::Group;

    #[test]
    fn decodes_empty_message() {
        let bytes = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 42, 0x03];
        let message = decode(&bytes[..], &DecodeOptions::default()).unwrap();
        assert_eq!(message.version_major, 1);
        assert_eq!(message.version_minor, 1);
        assert_eq!(message.code, 0x0002);
        assert_eq!(message.request_id, 42);
        assert!(message.groups.is_empty());
    }

    #[test]
    fn rejects_tag_zero() {
        let bytes = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 1, 0x00];
        assert!(decode(&bytes[..], &DecodeOptions::default()).is_err());
    }

    #[test]
    fn rejects_additional_value_without_attribute() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 1, 0x01];
        bytes.extend_from_slice(&[Tag::Integer.to_u8(), 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1]);
        bytes.push(Tag::End.to_u8());
        assert!(decode(&bytes[..], &DecodeOptions::default()).is_ok());

        let mut bytes = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 1, 0x01];
        bytes.extend_from_slice(&[Tag::Integer.to_u8(), 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 1]);
        bytes.extend_from_slice(&[Tag::Integer.to_u8(), 0x00, 0x00, 0x00, 0x04, 0, 0, 0, 2]);
        bytes.push(Tag::End.to_u8());
        let message = decode(&bytes[..], &DecodeOptions::default()).unwrap();
        assert_eq!(message.groups[0].attrs.as_ref().unwrap()[0].values.len(), 2);
    }

    #[test]
    fn round_trips_through_encoder() {
        let mut message = Message::new_request((1, 1), 0x0002, 7);
        let attr = Attribute::new("copies", Tag::Integer, Value::Integer(3));
        message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

        let bytes = encode_to_bytes(&message).unwrap();
        let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn collection_round_trips_through_encoder() {
        let member = Attribute::new("media", Tag::Keyword, Value::String(b"a4".to_vec()));
        let attr = Attribute::collection("media-col", vec![member]);
        let mut message = Message::new_request((1, 1), 0x0002, 7);
        message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

        let bytes = encode_to_bytes(&message).unwrap();
        let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn collection_depth_limit_enforced() {
        let mut message = Message::new_request((1, 1), 0x0002, 1);
        let mut members = vec![Attribute::new("leaf", Tag::Integer, Value::Integer(1))];
        for i in 0..40 {
            members = vec![Attribute::collection(format!("level{i}"), members)];
        }
        let attr = Attribute::collection("top", members);
        message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

        let bytes = encode_to_bytes(&message).unwrap();
        assert!(decode(&bytes[..], &DecodeOptions::default()).is_err());
    }

    #[test]
    fn workaround_adopts_member_attribute_name() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 1, 0x01];
        // BeginCollection attribute named "media-col", empty value
        bytes.push(Tag::BeginCollection.to_u8());
        bytes.extend_from_slice(&9u16.to_be_bytes());
        bytes.extend_from_slice(b"media-col");
        bytes.extend_from_slice(&0u16.to_be_bytes());
        // member without TagMemberName: carries its own name "media" directly
        bytes.push(Tag::Keyword.to_u8());
        bytes.extend_from_slice(&5u16.to_be_bytes());
        bytes.extend_from_slice(b"media");
        bytes.extend_from_slice(&2u16.to_be_bytes());
        bytes.extend_from_slice(b"a4");
        // end collection
        bytes.push(Tag::EndCollection.to_u8());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.push(Tag::End.to_u8());

        assert!(decode(&bytes[..], &DecodeOptions::default()).is_err());
        let options = DecodeOptions {
            enable_workarounds: true,
        };
        let message = decode(&bytes[..], &options).unwrap();
        let attr = &message.groups[0].attrs.as_ref().unwrap()[0];
        let Value::Collection(members) = &attr.values[0].1 else {
            panic!("expected collection");
        };
        assert_eq!(members[0].name, "media");
    }
}
