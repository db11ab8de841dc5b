//! The IPP tag catalog: delimiter tags, value tags, and the value-type each value tag implies.

use std::fmt;

/// A wire tag: either a delimiter (group boundary / end-of-message) or a value tag.
///
/// Unassigned value tags still round-trip via [`Tag::Unknown`] rather than being rejected —
/// the catalog in RFC 8010 §3.5.1 is not closed, and an unrecognized tag still carries a
/// well-defined value type (Binary, per the classification table).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[non_exhaustive]
pub enum Tag {
    // Delimiter tags (0x00-0x0f)
    Zero,
    OperationGroup,
    JobGroup,
    End,
    PrinterGroup,
    UnsupportedGroup,
    SubscriptionGroup,
    EventNotificationGroup,
    ResourceGroup,
    DocumentGroup,
    SystemGroup,
    /// 0x0b-0x0f: reserved for future group tags. Still a group per [`Tag::is_group`].
    ReservedGroup(u8),

    // Value tags with Void type
    Unsupported,
    Default,
    UnknownValue,
    NoValue,
    NotSettable,
    DeleteAttr,
    AdminDefine,
    EndCollection,

    // Integer
    Integer,
    Enum,

    // Boolean
    Boolean,

    // String
    OctetString,
    Text,
    Name,
    ReservedString,
    Keyword,
    Uri,
    UriScheme,
    Charset,
    Language,
    MimeType,
    MemberName,

    // DateTime
    DateTime,

    // Resolution
    Resolution,

    // Range
    Range,

    // Collection
    BeginCollection,

    // TextWithLang
    TextLang,
    NameLang,

    // Extension (smuggles a 32-bit tag inside the value)
    Extension,

    /// A value tag with no entry in the catalog above. Classified as Binary (§4.1).
    Unknown(u8),
}

/// The closed family of value shapes a [`Tag`] can imply.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ValueType {
    Void,
    Integer,
    Boolean,
    String,
    DateTime,
    Resolution,
    Range,
    TextWithLang,
    Binary,
    Collection,
}

impl Tag {
    /// Decodes a wire byte into a [`Tag`]. Infallible: unrecognized value tags become
    /// [`Tag::Unknown`], and unrecognized group tags in 0x0b-0x0f become [`Tag::ReservedGroup`].
    pub fn from_u8(b: u8) -> Tag {
        use Tag::*;
        match b {
            0x00 => Zero,
            0x01 => OperationGroup,
            0x02 => JobGroup,
            0x03 => End,
            0x04 => PrinterGroup,
            0x05 => UnsupportedGroup,
            0x06 => SubscriptionGroup,
            0x07 => EventNotificationGroup,
            0x08 => ResourceGroup,
            0x09 => DocumentGroup,
            0x0a => SystemGroup,
            0x0b..=0x0f => ReservedGroup(b),
            0x10 => Unsupported,
            0x11 => Default,
            0x12 => UnknownValue,
            0x13 => NoValue,
            0x15 => NotSettable,
            0x16 => DeleteAttr,
            0x17 => AdminDefine,
            0x21 => Integer,
            0x22 => Boolean,
            0x23 => Enum,
            0x30 => OctetString,
            0x31 => DateTime,
            0x32 => Resolution,
            0x33 => Range,
            0x34 => BeginCollection,
            0x35 => TextLang,
            0x36 => NameLang,
            0x37 => EndCollection,
            0x41 => Text,
            0x42 => Name,
            0x43 => ReservedString,
            0x44 => Keyword,
            0x45 => Uri,
            0x46 => UriScheme,
            0x47 => Charset,
            0x48 => Language,
            0x49 => MimeType,
            0x4a => MemberName,
            0x7f => Extension,
            other => Unknown(other),
        }
    }

    /// Encodes this tag back to its wire byte.
    pub fn to_u8(self) -> u8 {
        use Tag::*;
        match self {
            Zero => 0x00,
            OperationGroup => 0x01,
            JobGroup => 0x02,
            End => 0x03,
            PrinterGroup => 0x04,
            UnsupportedGroup => 0x05,
            SubscriptionGroup => 0x06,
            EventNotificationGroup => 0x07,
            ResourceGroup => 0x08,
            DocumentGroup => 0x09,
            SystemGroup => 0x0a,
            ReservedGroup(b) => b,
            Unsupported => 0x10,
            Default => 0x11,
            UnknownValue => 0x12,
            NoValue => 0x13,
            NotSettable => 0x15,
            DeleteAttr => 0x16,
            AdminDefine => 0x17,
            Integer => 0x21,
            Boolean => 0x22,
            Enum => 0x23,
            OctetString => 0x30,
            DateTime => 0x31,
            Resolution => 0x32,
            Range => 0x33,
            BeginCollection => 0x34,
            TextLang => 0x35,
            NameLang => 0x36,
            EndCollection => 0x37,
            Text => 0x41,
            Name => 0x42,
            ReservedString => 0x43,
            Keyword => 0x44,
            Uri => 0x45,
            UriScheme => 0x46,
            Charset => 0x47,
            Language => 0x48,
            MimeType => 0x49,
            MemberName => 0x4a,
            Extension => 0x7f,
            Unknown(b) => b,
        }
    }

    /// `true` for tags in [0x00, 0x0f].
    pub fn is_delimiter(self) -> bool {
        self.to_u8() < 0x10
    }

    /// `true` for delimiter tags other than [`Tag::Zero`] and [`Tag::End`].
    pub fn is_group(self) -> bool {
        self.is_delimiter() && !matches!(self, Tag::Zero | Tag::End)
    }

    /// The value-type class this tag implies. Only meaningful for non-delimiter tags.
    pub fn value_type(self) -> ValueType {
        use Tag::*;
        match self {
            Unsupported | Default | UnknownValue | NoValue | NotSettable | DeleteAttr
            | AdminDefine | EndCollection => ValueType::Void,
            Integer | Enum => ValueType::Integer,
            Boolean => ValueType::Boolean,
            OctetString | Text | Name | ReservedString | Keyword | Uri | UriScheme | Charset
            | Language | MimeType | MemberName => ValueType::String,
            DateTime => ValueType::DateTime,
            Resolution => ValueType::Resolution,
            Range => ValueType::Range,
            BeginCollection => ValueType::Collection,
            TextLang | NameLang => ValueType::TextWithLang,
            Extension | Unknown(_) => ValueType::Binary,
            // Delimiter tags have no value type; callers must not ask. Treat as Void
            // defensively rather than panicking on malformed call sites.
            Zero | OperationGroup | JobGroup | End | PrinterGroup | UnsupportedGroup
            | SubscriptionGroup | EventNotificationGroup | ResourceGroup | DocumentGroup
            | SystemGroup | ReservedGroup(_) => ValueType::Void,
        }
    }

    /// Short, stable name used by the formatter (§4.5) and in error messages.
    pub fn name(self) -> &'static str {
        use Tag::*;
        match self {
            Zero => "zero",
            OperationGroup => "operation-attributes-tag",
            JobGroup => "job-attributes-tag",
            End => "end-of-attributes-tag",
            PrinterGroup => "printer-attributes-tag",
            UnsupportedGroup => "unsupported-attributes-tag",
            SubscriptionGroup => "subscription-attributes-tag",
            EventNotificationGroup => "event-notification-attributes-tag",
            ResourceGroup => "resource-attributes-tag",
            DocumentGroup => "document-attributes-tag",
            SystemGroup => "system-attributes-tag",
            ReservedGroup(_) => "reserved-group-tag",
            Unsupported => "unsupported",
            Default => "default",
            UnknownValue => "unknown",
            NoValue => "no-value",
            NotSettable => "not-settable",
            DeleteAttr => "delete-attribute",
            AdminDefine => "admin-define",
            EndCollection => "end-collection",
            Integer => "integer",
            Enum => "enum",
            Boolean => "boolean",
            OctetString => "octetString",
            Text => "text",
            Name => "name",
            ReservedString => "reserved-string",
            Keyword => "keyword",
            Uri => "uri",
            UriScheme => "uriScheme",
            Charset => "charset",
            Language => "naturalLanguage",
            MimeType => "mimeMediaType",
            MemberName => "memberAttrName",
            DateTime => "dateTime",
            Resolution => "resolution",
            Range => "rangeOfInteger",
            BeginCollection => "begCollection",
            TextLang => "textWithLanguage",
            NameLang => "nameWithLanguage",
            Extension => "extension",
            Unknown(_) => "unknown-tag",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
