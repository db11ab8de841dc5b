//! A big-endian, offset-tracking byte reader (§4.4).
//!
//! Grounded on the teacher's `EndianReader` (`decoder/stream.rs`), stripped to big-endian only —
//! IPP has no byte-order marker, unlike TIFF.

use std::io::{self, Read};

use crate::error::{IppError, IppResult};

/// Wraps a [`Read`] and tracks the current byte offset, so decode errors can be annotated with
/// the position at which the failing read began (§7).
pub struct Reader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R) -> Reader<R> {
        Reader { inner, offset: 0 }
    }

    /// The byte offset of the next unread byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads exactly `buf.len()` bytes, failing with [`IppError::FormatError`] (truncated) on
    /// early EOF rather than propagating a generic `io::Error`, so callers get a uniform error
    /// type regardless of whether the short read was a stream-level I/O error or legitimate EOF.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> IppResult<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(crate::error::IppFormatError::Truncated.into())
            }
            Err(e) => Err(IppError::IoError(e)),
        }
    }

    pub fn read_u8(&mut self) -> IppResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> IppResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_u32(&mut self) -> IppResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Reads a length-prefixed byte string: a u16 BE length followed by that many bytes.
    pub fn read_counted_bytes(&mut self) -> IppResult<Vec<u8>> {
        let len = self.read_u16()? as usize;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }
}
