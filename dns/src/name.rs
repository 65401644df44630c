use crate::error::{DnsError, Result};
use byteorder::WriteBytesExt;
use std::fmt;
use std::io::Write;

// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4
pub const MAX_LABEL_SIZE: usize = 63;
pub const MAX_NAME_SIZE: usize = 255;

const POINTER_MASK: u8 = 0xC0;
const MAX_POINTERS: usize = 16;

/// A domain name as it sits in a message.
///
/// Holds the whole message, not just the name bytes, so that compression
/// pointers can be followed when the labels are read. A `Name` only comes out
/// of [`Name::parse`], which has already checked every length byte and
/// pointer, so walking the labels afterwards stays within the buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Name<'a> {
    message: &'a [u8],
    offset: usize,
    encoded_len: usize,
}

impl<'a> Name<'a> {
    pub fn parse(message: &'a [u8], offset: usize) -> Result<Self> {
        let malformed = |at: usize, reason: &'static str| DnsError::MalformedName { offset: at, reason };

        let mut pos = offset;
        let mut encoded_len = None;
        let mut wire_len = 0;
        let mut pointers = 0;

        loop {
            let len_byte = *message
                .get(pos)
                .ok_or_else(|| malformed(pos, "length byte past end of buffer"))?;

            match len_byte & POINTER_MASK {
                POINTER_MASK => {
                    let low = *message
                        .get(pos + 1)
                        .ok_or_else(|| malformed(pos, "truncated compression pointer"))?;
                    let target = usize::from(len_byte & !POINTER_MASK) << 8 | usize::from(low);

                    if target >= pos {
                        return Err(malformed(pos, "compression pointer does not point backwards"));
                    }
                    pointers += 1;
                    if pointers > MAX_POINTERS {
                        return Err(malformed(offset, "too many compression pointers"));
                    }
                    if encoded_len.is_none() {
                        encoded_len = Some(pos + 2 - offset);
                    }

                    pos = target;
                }
                0 => {
                    let label_len = usize::from(len_byte);
                    wire_len += 1 + label_len;
                    if wire_len > MAX_NAME_SIZE {
                        return Err(malformed(offset, "name longer than 255 octets"));
                    }

                    if label_len == 0 {
                        break;
                    }
                    if pos + 1 + label_len > message.len() {
                        return Err(malformed(pos, "label runs past end of buffer"));
                    }

                    pos += 1 + label_len;
                }
                _ => return Err(malformed(pos, "unsupported label type")),
            }
        }

        // a pointer ends the name at its own position, wherever it jumped to
        let encoded_len = match encoded_len {
            Some(len) => len,
            None => pos + 1 - offset,
        };

        Ok(Self {
            message,
            offset,
            encoded_len,
        })
    }

    /// Offset of the first length byte within the message.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes the name occupies at its own position, terminating zero or
    /// trailing pointer included.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// The name exactly as it appears on the wire at its position.
    pub fn encoded(&self) -> &'a [u8] {
        &self.message[self.offset..self.offset + self.encoded_len]
    }

    pub fn labels(&self) -> Labels<'a> {
        Labels {
            message: self.message,
            pos: self.offset,
        }
    }

    pub fn is_root(&self) -> bool {
        self.labels().next().is_none()
    }

    /// Length of the name once every pointer is expanded.
    pub fn uncompressed_len(&self) -> usize {
        self.labels().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    /// Writes the labels without compression.
    pub fn write_to<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        for label in self.labels() {
            wtr.write_u8(label.len() as u8)?;
            wtr.write_all(label)?;
        }
        wtr.write_u8(0)
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }

        for label in self.labels() {
            write_escaped(f, label)?;
            write!(f, ".")?;
        }

        Ok(())
    }
}

// RFC 1035 5.1: `\.` and `\\` for the delimiters, `\DDD` for bytes outside
// printable ASCII.
fn write_escaped(f: &mut fmt::Formatter, label: &[u8]) -> fmt::Result {
    for &b in label {
        match b {
            b'.' | b'\\' => write!(f, "\\{}", b as char)?,
            0x21..=0x7E => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03}", b)?,
        }
    }
    Ok(())
}

pub struct Labels<'a> {
    message: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        loop {
            let len_byte = *self.message.get(self.pos)?;

            if len_byte & POINTER_MASK == POINTER_MASK {
                let low = *self.message.get(self.pos + 1)?;
                self.pos = usize::from(len_byte & !POINTER_MASK) << 8 | usize::from(low);
                continue;
            }

            if len_byte == 0 {
                return None;
            }

            let begin = self.pos + 1;
            let end = begin + usize::from(len_byte);
            let label = self.message.get(begin..end)?;
            self.pos = end;

            return Some(label);
        }
    }
}
