use std::error::Error;
use std::fmt;
use std::io;
use std::str;

use crate::tag::Tag;
use crate::value::Value;

/// IPP codec error kinds.
#[derive(Debug)]
pub enum IppError {
    /// The message is not framed properly, or a decoded value violates the wire grammar.
    ///
    /// `offset` is the byte offset at which the failing read began, when known (always set for
    /// errors raised directly by the decoder's main loop; `None` for errors raised deeper inside
    /// value decoding before the decoder has a chance to annotate them, which in practice never
    /// escapes this crate unannotated — see [`decoder`](crate::decoder)).
    FormatError {
        offset: Option<u64>,
        error: IppFormatError,
    },

    /// An I/O error occurred while reading or writing the byte stream.
    IoError(io::Error),

    /// A length field or recursion depth exceeded the bounds described in §5 (resource model).
    ///
    /// Carries an offset with the same semantics as `FormatError`'s, so a collection-depth
    /// overflow gets the same `"<error> at 0x<hex>"` annotation every other decode failure does.
    LimitsExceeded { offset: Option<u64> },

    /// The caller asked the encoder to do something the wire format cannot express.
    UsageError(UsageError),
}

impl IppError {
    /// Returns this error with its offset set to `offset`, unless it already has one (an inner,
    /// more specific offset from a nested collection parse takes precedence).
    pub(crate) fn with_offset(self, offset: u64) -> IppError {
        match self {
            IppError::FormatError { offset: None, error } => IppError::FormatError {
                offset: Some(offset),
                error,
            },
            IppError::LimitsExceeded { offset: None } => {
                IppError::LimitsExceeded { offset: Some(offset) }
            }
            other => other,
        }
    }
}

/// The message is not formatted properly, or the decoder was asked to emit bytes it cannot.
///
/// The list of variants may grow to incorporate errors of future features. Matching against this
/// exhaustively is not covered by interface stability guarantees.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IppFormatError {
    /// `TagZero` (0x00) encountered where a tag was expected.
    InvalidZeroTag,
    /// End-of-stream reached before `TagEnd`, or a length field demanded more bytes than remain.
    Truncated,
    /// `TagMemberName` or `TagEndCollection` used outside a collection body.
    MemberTagOutsideCollection,
    /// A delimiter tag appeared inside a collection body.
    DelimiterInsideCollection,
    /// A nameless attribute (additional value) appeared with no preceding named attribute.
    AdditionalValueWithoutAttribute,
    /// A named attribute appeared with no preceding group.
    AttributeWithoutGroup,
    /// A `TagMemberName` value was empty, or a second one appeared before the first was consumed.
    InvalidMemberName,
    /// A collection member appeared with no pending member name and no preceding member to extend.
    MemberWithoutName,
    /// A fixed-width value (Integer/Boolean/DateTime/Resolution/Range) had the wrong byte length.
    InvalidValueLength { tag: Tag, expected: usize, actual: usize },
    /// A DateTime field was outside its valid range (month, day, hour, ...).
    InvalidDateTime(String),
    /// A TextWithLang value's internal length fields were inconsistent with the value's total length.
    InvalidTextWithLang,
    /// An Extension-tagged value's payload was shorter than 4 bytes.
    ExtensionTagTooShort,
    /// An Extension-tagged value's embedded 32-bit tag exceeded 0x7fffffff.
    ExtensionTagOutOfRange(u32),
    /// Value bytes were not valid UTF-8 where the caller requested a `&str` view, or an
    /// attribute name was not valid UTF-8.
    InvalidUtf8,
    /// A value did not have the type implied by its tag.
    UnexpectedValue { tag: Tag, value: Value },
}

impl fmt::Display for IppFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use IppFormatError::*;
        match self {
            InvalidZeroTag => write!(f, "invalid tag 0"),
            Truncated => write!(f, "message truncated"),
            MemberTagOutsideCollection => {
                write!(f, "member-name or end-collection tag outside a collection")
            }
            DelimiterInsideCollection => write!(f, "delimiter tag inside a collection"),
            AdditionalValueWithoutAttribute => {
                write!(f, "additional value with no preceding attribute")
            }
            AttributeWithoutGroup => write!(f, "attribute with no preceding group"),
            InvalidMemberName => write!(f, "empty or duplicate member-name in collection"),
            MemberWithoutName => write!(f, "collection member with no pending name"),
            InvalidValueLength {
                tag,
                expected,
                actual,
            } => write!(
                f,
                "tag `{tag}` expected a {expected}-byte value, got {actual}"
            ),
            InvalidDateTime(reason) => write!(f, "invalid dateTime value: {reason}"),
            InvalidTextWithLang => write!(f, "inconsistent textWithLanguage length fields"),
            ExtensionTagTooShort => write!(f, "extension tag value shorter than 4 bytes"),
            ExtensionTagOutOfRange(tag) => {
                write!(f, "extension tag 0x{tag:08x} exceeds 0x7fffffff")
            }
            InvalidUtf8 => write!(f, "value bytes are not valid UTF-8"),
            UnexpectedValue { tag, value } => {
                write!(f, "tag `{tag}` does not accept value {value:?}")
            }
        }
    }
}

/// The caller attempted to encode something the wire format cannot express.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum UsageError {
    /// An attribute was constructed with zero values.
    EmptyValues,
    /// An attribute name exceeded 32767 bytes.
    NameTooLong(usize),
    /// An encoded value exceeded 32767 bytes.
    ValueTooLong(usize),
    /// A delimiter tag, `TagMemberName`, or `TagEndCollection` was used as an attribute's tag.
    ForbiddenTag(Tag),
    /// An attribute without a name was used outside a collection member position.
    MissingName,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use UsageError::*;
        match self {
            EmptyValues => write!(f, "attribute must have at least one value"),
            NameTooLong(len) => write!(f, "attribute name of {len} bytes exceeds 32767"),
            ValueTooLong(len) => write!(f, "encoded value of {len} bytes exceeds 32767"),
            ForbiddenTag(tag) => write!(f, "tag `{tag}` cannot be used at the attribute level"),
            MissingName => write!(f, "attribute requires a non-empty name"),
        }
    }
}

impl fmt::Display for IppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IppError::FormatError { offset: Some(o), error } => write!(f, "{error} at 0x{o:x}"),
            IppError::FormatError { offset: None, error } => write!(f, "{error}"),
            IppError::IoError(e) => e.fmt(f),
            IppError::LimitsExceeded { offset: Some(o) } => {
                write!(f, "decoder limits exceeded at 0x{o:x}")
            }
            IppError::LimitsExceeded { offset: None } => write!(f, "decoder limits exceeded"),
            IppError::UsageError(e) => write!(f, "usage error: {e}"),
        }
    }
}

impl Error for IppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IppError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IppError {
    fn from(err: io::Error) -> IppError {
        IppError::IoError(err)
    }
}

impl From<str::Utf8Error> for IppError {
    fn from(_err: str::Utf8Error) -> IppError {
        IppFormatError::InvalidUtf8.into()
    }
}

impl From<IppFormatError> for IppError {
    fn from(err: IppFormatError) -> IppError {
        IppError::FormatError {
            offset: None,
            error: err,
        }
    }
}

impl From<UsageError> for IppError {
    fn from(err: UsageError) -> IppError {
        IppError::UsageError(err)
    }
}

/// Result of an encoding/decoding operation.
pub type IppResult<T> = Result<T, IppError>;
