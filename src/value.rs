//! The typed IPP value system (§3, §4.1, §4.2).

use std::fmt;
use std::str;

use crate::error::{IppError, IppFormatError, IppResult};
use crate::model::Attribute;
use crate::tag::{Tag, ValueType};

/// An RFC 2579 `dateTime` value, stored field-by-field exactly as it appears on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub deciseconds: u8,
    /// `'+'` or `'-'`.
    pub utc_sign: u8,
    pub utc_hours: u8,
    pub utc_minutes: u8,
}

/// A `resolution` value. `units` is preserved even when it is outside the known {3, 4} set
/// (§4.2): an unrecognized unit byte still round-trips.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Resolution {
    pub x: i32,
    pub y: i32,
    pub units: u8,
}

/// A `rangeOfInteger` value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Range {
    pub lower: i32,
    pub upper: i32,
}

/// A `textWithLanguage`/`nameWithLanguage` value. Stores raw bytes for both fields rather than
/// `String`, mirroring the decision for [`Value::String`] — the codec does not require UTF-8
/// (§9 Open Question).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TextWithLang {
    pub lang: Vec<u8>,
    pub text: Vec<u8>,
}

/// The closed family of IPP value shapes (§3).
#[derive(Clone, PartialEq, Debug)]
#[non_exhaustive]
pub enum Value {
    Void,
    Integer(i32),
    Boolean(bool),
    /// Raw octets. Most string tags carry UTF-8 or US-ASCII in practice, but the codec does not
    /// enforce this (§1 non-goals); use [`Value::as_str`] for a fallible text view.
    String(Vec<u8>),
    DateTime(DateTime),
    Resolution(Resolution),
    Range(Range),
    TextWithLang(TextWithLang),
    Binary(Vec<u8>),
    /// An ordered, possibly-nested sequence of member attributes (§4.3, §4.4).
    Collection(Vec<Attribute>),
}

impl Value {
    /// The value-type class this value belongs to, independent of which tag it is paired with.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Void => ValueType::Void,
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::String(_) => ValueType::String,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Resolution(_) => ValueType::Resolution,
            Value::Range(_) => ValueType::Range,
            Value::TextWithLang(_) => ValueType::TextWithLang,
            Value::Binary(_) => ValueType::Binary,
            Value::Collection(_) => ValueType::Collection,
        }
    }

    /// A UTF-8 view over [`Value::String`] bytes, or the text half of a [`Value::TextWithLang`].
    pub fn as_str(&self) -> IppResult<&str> {
        let bytes = match self {
            Value::String(b) => b,
            Value::TextWithLang(t) => &t.text,
            _ => return Err(IppFormatError::InvalidUtf8.into()),
        };
        Ok(str::from_utf8(bytes)?)
    }

    /// Encodes the scalar payload of this value (everything but the length prefix, and nothing
    /// for [`Value::Collection`] — its body is written out-of-band by the encoder, §4.3).
    pub fn encode_bytes(&self) -> IppResult<Vec<u8>> {
        Ok(match self {
            Value::Void | Value::Collection(_) => Vec::new(),
            Value::Integer(n) => n.to_be_bytes().to_vec(),
            Value::Boolean(b) => vec![if *b { 1 } else { 0 }],
            Value::String(bytes) | Value::Binary(bytes) => bytes.clone(),
            Value::DateTime(dt) => vec![
                (dt.year >> 8) as u8,
                dt.year as u8,
                dt.month,
                dt.day,
                dt.hour,
                dt.minute,
                dt.second,
                dt.deciseconds,
                dt.utc_sign,
                dt.utc_hours,
                dt.utc_minutes,
            ],
            Value::Resolution(r) => {
                let mut buf = Vec::with_capacity(9);
                buf.extend_from_slice(&r.x.to_be_bytes());
                buf.extend_from_slice(&r.y.to_be_bytes());
                buf.push(r.units);
                buf
            }
            Value::Range(r) => {
                let mut buf = Vec::with_capacity(8);
                buf.extend_from_slice(&r.lower.to_be_bytes());
                buf.extend_from_slice(&r.upper.to_be_bytes());
                buf
            }
            Value::TextWithLang(t) => {
                if t.lang.len() > 0x7fff || t.text.len() > 0x7fff {
                    return Err(crate::error::UsageError::ValueTooLong(t.lang.len().max(t.text.len())).into());
                }
                let mut buf = Vec::with_capacity(2 + t.lang.len() + 2 + t.text.len());
                buf.extend_from_slice(&(t.lang.len() as u16).to_be_bytes());
                buf.extend_from_slice(&t.lang);
                buf.extend_from_slice(&(t.text.len() as u16).to_be_bytes());
                buf.extend_from_slice(&t.text);
                buf
            }
        })
    }

    /// Decodes a scalar value's bytes according to the value type implied by `tag`.
    ///
    /// Does not handle [`ValueType::Collection`] — the collection body lives out-of-band in the
    /// byte stream and is parsed by the decoder's collection sub-parser (§4.4), not here.
    pub fn decode_bytes(tag: Tag, bytes: &[u8]) -> IppResult<Value> {
        match tag.value_type() {
            ValueType::Void => Ok(Value::Void),
            ValueType::Integer => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| IppFormatError::InvalidValueLength {
                    tag,
                    expected: 4,
                    actual: bytes.len(),
                })?;
                Ok(Value::Integer(i32::from_be_bytes(arr)))
            }
            ValueType::Boolean => {
                if bytes.len() != 1 {
                    return Err(IppFormatError::InvalidValueLength {
                        tag,
                        expected: 1,
                        actual: bytes.len(),
                    }
                    .into());
                }
                Ok(Value::Boolean(bytes[0] != 0))
            }
            ValueType::String => Ok(Value::String(bytes.to_vec())),
            ValueType::Binary => Ok(Value::Binary(bytes.to_vec())),
            ValueType::DateTime => Ok(Value::DateTime(decode_date_time(tag, bytes)?)),
            ValueType::Resolution => {
                if bytes.len() != 9 {
                    return Err(IppFormatError::InvalidValueLength {
                        tag,
                        expected: 9,
                        actual: bytes.len(),
                    }
                    .into());
                }
                Ok(Value::Resolution(Resolution {
                    x: i32::from_be_bytes(bytes[0..4].try_into().unwrap()),
                    y: i32::from_be_bytes(bytes[4..8].try_into().unwrap()),
                    units: bytes[8],
                }))
            }
            ValueType::Range => {
                if bytes.len() != 8 {
                    return Err(IppFormatError::InvalidValueLength {
                        tag,
                        expected: 8,
                        actual: bytes.len(),
                    }
                    .into());
                }
                Ok(Value::Range(Range {
                    lower: i32::from_be_bytes(bytes[0..4].try_into().unwrap()),
                    upper: i32::from_be_bytes(bytes[4..8].try_into().unwrap()),
                }))
            }
            ValueType::TextWithLang => Ok(Value::TextWithLang(decode_text_with_lang(bytes)?)),
            ValueType::Collection => unreachable!("collections are decoded by the decoder, not Value::decode_bytes"),
        }
    }

    /// A stable, human-readable rendering used by the formatter (§4.5).
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Void => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            Value::String(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Value::DateTime(dt) => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{}{}{:02}:{:02}",
                dt.year,
                dt.month,
                dt.day,
                dt.hour,
                dt.minute,
                dt.second,
                dt.deciseconds,
                dt.utc_sign as char,
                dt.utc_hours,
                dt.utc_minutes
            ),
            Value::Resolution(r) => {
                let units = match r.units {
                    3 => "dpi".to_string(),
                    4 => "dpcm".to_string(),
                    other => format!("unknown(0x{other:02x})"),
                };
                format!("{}x{}{}", r.x, r.y, units)
            }
            Value::Range(r) => format!("{}-{}", r.lower, r.upper),
            Value::TextWithLang(t) => format!(
                "{} [{}]",
                String::from_utf8_lossy(&t.text),
                String::from_utf8_lossy(&t.lang)
            ),
            Value::Binary(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
            Value::Collection(_) => "{collection}".to_string(),
        }
    }

    /// The similarity relation over values (§4.6): equal implies similar, plus a
    /// String/Binary byte-equivalence bridge and recursive Collection similarity.
    pub fn similar(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Collection(a), Value::Collection(b)) => attrs_similar(a, b),
            (Value::String(a), Value::String(b))
            | (Value::Binary(a), Value::Binary(b))
            | (Value::String(a), Value::Binary(b))
            | (Value::Binary(a), Value::String(b)) => a == b,
            _ => self == other,
        }
    }
}

/// Similarity over attribute lists: same length, sorted by name (stable), pairwise similar (§4.6).
pub(crate) fn attrs_similar(a: &[Attribute], b: &[Attribute]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted: Vec<&Attribute> = a.iter().collect();
    let mut b_sorted: Vec<&Attribute> = b.iter().collect();
    a_sorted.sort_by(|x, y| x.name.cmp(&y.name));
    b_sorted.sort_by(|x, y| x.name.cmp(&y.name));
    a_sorted
        .iter()
        .zip(b_sorted.iter())
        .all(|(x, y)| x.similar(y))
}

fn decode_date_time(tag: Tag, bytes: &[u8]) -> IppResult<DateTime> {
    if bytes.len() != 11 {
        return Err(IppFormatError::InvalidValueLength {
            tag,
            expected: 11,
            actual: bytes.len(),
        }
        .into());
    }
    let year = u16::from_be_bytes([bytes[0], bytes[1]]);
    let month = bytes[2];
    let day = bytes[3];
    let hour = bytes[4];
    let minute = bytes[5];
    let second = bytes[6];
    let deciseconds = bytes[7];
    let utc_sign = bytes[8];
    let utc_hours = bytes[9];
    let utc_minutes = bytes[10];

    let check = |cond: bool, what: &str| -> IppResult<()> {
        if cond {
            Ok(())
        } else {
            Err(IppFormatError::InvalidDateTime(what.to_string()).into())
        }
    };
    check((1..=12).contains(&month), "month out of range")?;
    check((1..=31).contains(&day), "day out of range")?;
    check(hour <= 23, "hour out of range")?;
    check(minute <= 59, "minute out of range")?;
    check(second <= 60, "second out of range")?;
    check(deciseconds <= 9, "deciseconds out of range")?;
    check(utc_sign == b'+' || utc_sign == b'-', "utc sign must be '+' or '-'")?;
    check(utc_hours <= 13, "utc hours out of range")?;
    check(utc_minutes <= 59, "utc minutes out of range")?;

    Ok(DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        deciseconds,
        utc_sign,
        utc_hours,
        utc_minutes,
    })
}

fn decode_text_with_lang(bytes: &[u8]) -> IppResult<TextWithLang> {
    if bytes.len() < 2 {
        return Err(IppFormatError::InvalidTextWithLang.into());
    }
    let lang_len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let lang_end = 2 + lang_len;
    if bytes.len() < lang_end + 2 {
        return Err(IppFormatError::InvalidTextWithLang.into());
    }
    let lang = bytes[2..lang_end].to_vec();
    let text_len = u16::from_be_bytes([bytes[lang_end], bytes[lang_end + 1]]) as usize;
    let text_start = lang_end + 2;
    let text_end = text_start + text_len;
    if bytes.len() != text_end {
        return Err(IppFormatError::InvalidTextWithLang.into());
    }
    let text = bytes[text_start..text_end].to_vec();
    Ok(TextWithLang { lang, text })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
