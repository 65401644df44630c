use crate::error::{DnsError, Result};
use crate::name::Name;
use crate::types::{class_name, type_name};
use crate::utils::hex_dump;
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::fmt;
use std::io::{Cursor, Write};

// type + class + ttl + rdlength
const FIXED_FIELDS_SIZE: usize = 10;

/// Used by the answer, authority and additional sections.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResourceRecord<'a> {
    pub name: Name<'a>,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: &'a [u8],
}

impl<'a> ResourceRecord<'a> {
    pub fn parse_from_reader(rdr: &mut Cursor<&'a [u8]>) -> Result<Self> {
        let message: &'a [u8] = *rdr.get_ref();
        let start = rdr.position() as usize;

        let name = Name::parse(message, start)?;
        rdr.set_position((start + name.encoded_len()) as u64);

        let malformed = |_: std::io::Error| DnsError::MalformedResource { offset: start };
        let rtype = rdr.read_u16::<BE>().map_err(malformed)?;
        let rclass = rdr.read_u16::<BE>().map_err(malformed)?;
        let ttl = rdr.read_u32::<BE>().map_err(malformed)?;
        let rdlength = rdr.read_u16::<BE>().map_err(malformed)?;

        let rdata_begin = rdr.position() as usize;
        let rdata_end = rdata_begin + usize::from(rdlength);
        let rdata = message
            .get(rdata_begin..rdata_end)
            .ok_or(DnsError::MalformedResource { offset: start })?;
        rdr.set_position(rdata_end as u64);

        let record = Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        };

        Ok(record)
    }

    pub fn rdlength(&self) -> usize {
        self.rdata.len()
    }

    /// Name bytes as found in the message, fixed fields and rdata.
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + FIXED_FIELDS_SIZE + self.rdata.len()
    }

    pub fn write_to<W: Write>(&self, wtr: &mut W) -> Result<()> {
        if self.rdata.len() > usize::from(u16::MAX) {
            return Err(DnsError::RdataTooLong(self.rdata.len()));
        }

        self.name.write_to(wtr)?;
        wtr.write_u16::<BE>(self.rtype)?;
        wtr.write_u16::<BE>(self.rclass)?;
        wtr.write_u32::<BE>(self.ttl)?;
        wtr.write_u16::<BE>(self.rdata.len() as u16)?;
        wtr.write_all(self.rdata)?;

        Ok(())
    }
}

impl fmt::Display for ResourceRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name: {} ({}), type: {} ({}), class: {} ({}), ttl: {}, rdlength: {}, rdata: {}",
            hex_dump(self.name.encoded()),
            self.name,
            type_name(self.rtype),
            self.rtype,
            class_name(self.rclass),
            self.rclass,
            self.ttl,
            self.rdlength(),
            hex_dump(self.rdata),
        )
    }
}
