use crate::error::{DnsError, Result};
use crate::name::Name;
use crate::types::{class_name, type_name};
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::fmt;
use std::io::{Cursor, Write};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Question<'a> {
    pub name: Name<'a>,
    pub qtype: u16,
    pub qclass: u16,
}

impl<'a> Question<'a> {
    pub fn new(name: Name<'a>, qtype: u16, qclass: u16) -> Self {
        Self { name, qtype, qclass }
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&'a [u8]>) -> Result<Self> {
        let message: &'a [u8] = *rdr.get_ref();
        let start = rdr.position() as usize;

        let name = Name::parse(message, start)?;
        rdr.set_position((start + name.encoded_len()) as u64);

        let malformed = |_: std::io::Error| DnsError::MalformedQuestion { offset: start };
        let qtype = rdr.read_u16::<BE>().map_err(malformed)?;
        let qclass = rdr.read_u16::<BE>().map_err(malformed)?;

        let q = Self {
            name,
            qtype,
            qclass,
        };

        Ok(q)
    }

    /// Name bytes as found in the message plus qtype and qclass.
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + 4
    }

    pub fn write_to<W: Write>(&self, wtr: &mut W) -> Result<()> {
        self.name.write_to(wtr)?;
        wtr.write_u16::<BE>(self.qtype)?;
        wtr.write_u16::<BE>(self.qclass)?;

        Ok(())
    }
}

impl fmt::Display for Question<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} ({:04X}) {} ({:04X})",
            self.name,
            type_name(self.qtype),
            self.qtype,
            class_name(self.qclass),
            self.qclass
        )
    }
}
