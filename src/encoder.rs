//! Encodes a [`Message`] into the IPP wire format (§4.3).
//!
//! Grounded on the teacher's `encoder/mod.rs` + `encoder/directory_encoder.rs` (walk a directory,
//! write each entry's tag/type/count/value), generalized to IPP's recursive, nameless-value
//! continuation grammar and its inline collection sub-grammar.

use std::io::Write;

use crate::error::{IppFormatError, IppResult, UsageError};
use crate::model::{Attribute, Group, Message};
use crate::tag::{Tag, ValueType};
use crate::value::Value;
use crate::writer::Writer;

/// Encodes `message` into `sink`.
pub fn encode<W: Write>(message: &Message, sink: W) -> IppResult<()> {
    let mut writer = Writer::new(sink);
    writer.write_u8(message.version_major)?;
    writer.write_u8(message.version_minor)?;
    writer.write_u16(message.code)?;
    writer.write_u32(message.request_id)?;
    for group in &message.groups {
        encode_group(&mut writer, group)?;
    }
    writer.write_u8(Tag::End.to_u8())?;
    Ok(())
}

/// Encodes `message` into a freshly allocated byte vector.
pub fn encode_to_bytes(message: &Message) -> IppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    encode(message, &mut bytes)?;
    Ok(bytes)
}

fn encode_group<W: Write>(writer: &mut Writer<W>, group: &Group) -> IppResult<()> {
    writer.write_u8(group.tag.to_u8())?;
    if let Some(attrs) = &group.attrs {
        for attr in attrs {
            encode_attribute(writer, attr)?;
        }
    }
    Ok(())
}

fn encode_attribute<W: Write>(writer: &mut Writer<W>, attr: &Attribute) -> IppResult<()> {
    if attr.name.is_empty() {
        return Err(UsageError::MissingName.into());
    }
    encode_values(writer, &attr.name, &attr.values)
}

/// Writes `values` as the additional-value convention: `first_name` on the first pair, an empty
/// name on every subsequent one. Shared between top-level attributes and collection members.
fn encode_values<W: Write>(
    writer: &mut Writer<W>,
    first_name: &str,
    values: &[(Tag, Value)],
) -> IppResult<()> {
    for (i, (tag, value)) in values.iter().enumerate() {
        let name = if i == 0 { first_name } else { "" };
        encode_one(writer, name, *tag, value)?;
    }
    Ok(())
}

fn check_tag_allowed(tag: Tag) -> IppResult<()> {
    if tag.is_delimiter() || matches!(tag, Tag::MemberName | Tag::EndCollection) {
        return Err(UsageError::ForbiddenTag(tag).into());
    }
    Ok(())
}

/// Writes a single (tag, value) pair as one attribute record, recursing into the collection
/// sub-grammar when `tag` is `BeginCollection`.
fn encode_one<W: Write>(writer: &mut Writer<W>, name: &str, tag: Tag, value: &Value) -> IppResult<()> {
    check_tag_allowed(tag)?;

    let bytes = if tag == Tag::Extension {
        let Value::Binary(data) = value else {
            return Err(IppFormatError::UnexpectedValue {
                tag,
                value: value.clone(),
            }
            .into());
        };
        if data.len() < 4 {
            return Err(IppFormatError::ExtensionTagTooShort.into());
        }
        let embedded = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        if embedded > 0x7fffffff {
            return Err(IppFormatError::ExtensionTagOutOfRange(embedded).into());
        }
        data.clone()
    } else if tag.value_type() != value.value_type() {
        if tag.value_type() == ValueType::Void {
            Vec::new()
        } else {
            return Err(IppFormatError::UnexpectedValue {
                tag,
                value: value.clone(),
            }
            .into());
        }
    } else {
        value.encode_bytes()?
    };

    if name.len() > 0x7fff {
        return Err(UsageError::NameTooLong(name.len()).into());
    }
    if bytes.len() > 0x7fff {
        return Err(UsageError::ValueTooLong(bytes.len()).into());
    }

    writer.write_u8(tag.to_u8())?;
    writer.write_counted_bytes(name.as_bytes())?;
    writer.write_counted_bytes(&bytes)?;

    if tag == Tag::BeginCollection {
        if let Value::Collection(members) = value {
            encode_collection_body(writer, members)?;
        }
    }
    Ok(())
}

fn encode_collection_body<W: Write>(writer: &mut Writer<W>, members: &[Attribute]) -> IppResult<()> {
    for member in members {
        if member.name.is_empty() {
            return Err(UsageError::MissingName.into());
        }
        write_raw(writer, "", Tag::MemberName, member.name.as_bytes())?;
        encode_values(writer, "", &member.values)?;
    }
    write_raw(writer, "", Tag::EndCollection, &[])
}

/// Writes an attribute record for a wire-level marker (`MemberName`/`EndCollection`) that the
/// encoder generates itself rather than one supplied by the caller, bypassing
/// [`check_tag_allowed`] since those tags are legitimately forbidden only at the user-facing
/// attribute level (§4.3).
fn write_raw<W: Write>(writer: &mut Writer<W>, name: &str, tag: Tag, bytes: &[u8]) -> IppResult<()> {
    writer.write_u8(tag.to_u8())?;
    writer.write_counted_bytes(name.as_bytes())?;
    writer.write_counted_bytes(bytes)?;
    Ok(())
}
