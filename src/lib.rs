//! Encoding and decoding of the Internet Printing Protocol (IPP) binary message layer
//!
//! IPP (RFC 8010/8011) is a binary request/response protocol, normally carried over HTTP, built
//! from a tag/length/value attribute framing with a small, closed set of value types and an
//! inline nested-collection sub-grammar. This crate implements the message layer only: it
//! encodes an in-memory [`Message`] to bytes and decodes bytes back to a `Message`. It does not
//! perform any network I/O, and it does not know the semantics of specific operations.
//!
//! # Related Links
//! * <https://www.rfc-editor.org/rfc/rfc8010> - IPP/1.1 encoding and transport
//! * <https://www.rfc-editor.org/rfc/rfc8011> - IPP/1.1 model and semantics

mod decoder;
mod encoder;
mod error;
mod format;
pub mod model;
pub mod registry;
pub mod tag;
pub mod value;

mod reader;
mod writer;

pub use self::decoder::{decode, DecodeOptions};
pub use self::encoder::{encode, encode_to_bytes};
pub use self::error::{IppError, IppFormatError, IppResult, UsageError};
pub use self::format::Formatter;
pub use self::model::{Attribute, Group, Message};
pub use self::tag::{Tag, ValueType};
pub use self::value::Value;

/// The HTTP content type a transport-owning caller should set when sending an IPP message.
///
/// This crate does not open sockets or set HTTP headers itself; the constant exists purely so a
/// caller that does own a transport does not need to hardcode the MIME type.
pub const CONTENT_TYPE: &str = "application/ipp";
