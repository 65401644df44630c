use crate::error::{DnsError, Result};
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::fmt;
use std::io::{Cursor, Write};

pub const HEADER_SIZE: usize = 12;

//                                 1  1  1  1  1  1
//   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |                      ID                       |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |                QDCOUNT / ANCOUNT              |
// |                NSCOUNT / ARCOUNT              |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,   // query = false, response = true
    pub opcode: u8, // 0 = QUERY, 1 = IQUERY, 2 = STATUS
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8, // must be zero
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Header of a reply to the query `id`: qr and ra set, rd set, no records.
    pub fn reply(id: u16) -> Self {
        Self {
            id,
            qr: true,
            rd: true,
            ra: true,
            ..Self::default()
        }
    }

    /// Header of a standard recursive query with a single question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            rd: true,
            qdcount: 1,
            ..Self::default()
        }
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self> {
        let start = rdr.position() as usize;
        let available = rdr.get_ref().len().saturating_sub(start);
        if available < HEADER_SIZE {
            return Err(DnsError::MalformedHeader { len: available });
        }

        read_fields(rdr).map_err(|_| DnsError::MalformedHeader { len: available })
    }

    pub fn write_to<W: Write>(&self, wtr: &mut W) -> Result<()> {
        let flags_high = (self.qr as u8) << 7
            | (self.opcode & 0x0F) << 3
            | (self.aa as u8) << 2
            | (self.tc as u8) << 1
            | self.rd as u8;
        let flags_low = (self.ra as u8) << 7 | (self.z & 0x07) << 4 | (self.rcode & 0x0F);

        wtr.write_u16::<BE>(self.id)?;
        wtr.write_u8(flags_high)?;
        wtr.write_u8(flags_low)?;
        wtr.write_u16::<BE>(self.qdcount)?;
        wtr.write_u16::<BE>(self.ancount)?;
        wtr.write_u16::<BE>(self.nscount)?;
        wtr.write_u16::<BE>(self.arcount)?;

        Ok(())
    }
}

fn read_fields(rdr: &mut Cursor<&[u8]>) -> std::io::Result<Header> {
    let id = rdr.read_u16::<BE>()?;
    let flags_high = rdr.read_u8()?;
    let flags_low = rdr.read_u8()?;
    let qdcount = rdr.read_u16::<BE>()?;
    let ancount = rdr.read_u16::<BE>()?;
    let nscount = rdr.read_u16::<BE>()?;
    let arcount = rdr.read_u16::<BE>()?;

    let h = Header {
        id,
        qr: flags_high & 0x80 != 0,
        opcode: (flags_high & 0x78) >> 3,
        aa: flags_high & 0x04 != 0,
        tc: flags_high & 0x02 != 0,
        rd: flags_high & 0x01 != 0,
        ra: flags_low & 0x80 != 0,
        z: (flags_low & 0x70) >> 4,
        rcode: flags_low & 0x0F,
        qdcount,
        ancount,
        nscount,
        arcount,
    };

    Ok(h)
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id: {}, qr: {}, opcode: {}, aa: {}, tc: {}, rd: {}, ra: {}, z: {}, rcode: {}, \
             qdcount: {}, ancount: {}, nscount: {}, arcount: {}",
            self.id,
            self.qr as u8,
            self.opcode,
            self.aa as u8,
            self.tc as u8,
            self.rd as u8,
            self.ra as u8,
            self.z,
            self.rcode,
            self.qdcount,
            self.ancount,
            self.nscount,
            self.arcount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Result<Header> {
        Header::parse_from_reader(&mut Cursor::new(bytes))
    }

    #[test]
    fn parse_flags_test() {
        // qr=1 opcode=2 aa=1 tc=0 rd=1 | ra=1 z=0 rcode=3
        let bytes = [0x12, 0x34, 0x95, 0x83, 0, 1, 0, 2, 0, 3, 0, 4];
        let h = parse(&bytes).unwrap();

        assert_eq!(h.id, 0x1234);
        assert!(h.qr);
        assert_eq!(h.opcode, 2);
        assert!(h.aa);
        assert!(!h.tc);
        assert!(h.rd);
        assert!(h.ra);
        assert_eq!(h.z, 0);
        assert_eq!(h.rcode, 3);
        assert_eq!((h.qdcount, h.ancount, h.nscount, h.arcount), (1, 2, 3, 4));
    }

    #[test]
    fn header_size_boundary_test() {
        let bytes = [0u8; 12];

        match parse(&bytes[..11]) {
            Err(DnsError::MalformedHeader { len }) => assert_eq!(len, 11),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse(&bytes).is_ok());
    }

    #[test]
    fn parse_at_offset_test() {
        let mut bytes = vec![0xFF; 4];
        bytes.extend_from_slice(&[0xAB, 0xCD, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);

        let mut rdr = Cursor::new(&bytes[..]);
        rdr.set_position(4);
        let h = Header::parse_from_reader(&mut rdr).unwrap();

        assert_eq!(h.id, 0xABCD);
        assert!(h.rd);
        assert_eq!(rdr.position(), 16);

        rdr.set_position(5);
        assert!(Header::parse_from_reader(&mut rdr).is_err());
    }

    #[test]
    fn write_round_trip_test() {
        let h = Header {
            id: 0xBEEF,
            qr: true,
            opcode: 1,
            aa: false,
            tc: true,
            rd: false,
            ra: true,
            z: 0,
            rcode: 5,
            qdcount: 1,
            ancount: 0,
            nscount: 7,
            arcount: 65535,
        };

        let mut bytes: Vec<u8> = vec![];
        h.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, h);

        let mut again: Vec<u8> = vec![];
        parsed.write_to(&mut again).unwrap();
        assert_eq!(again, bytes);
    }

    #[test]
    fn write_masks_narrow_fields_test() {
        let h = Header {
            opcode: 0xFF,
            z: 0xFF,
            rcode: 0xFF,
            ..Header::default()
        };

        let mut bytes: Vec<u8> = vec![];
        h.write_to(&mut bytes).unwrap();

        assert_eq!(bytes[2], 0x78);
        assert_eq!(bytes[3], 0x7F);
    }

    #[test]
    fn reply_header_bytes_test() {
        let mut bytes: Vec<u8> = vec![];
        Header::reply(0x1234).write_to(&mut bytes).unwrap();

        assert_eq!(bytes, [0x12, 0x34, 0x81, 0x80, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
