use crate::error::Result;
use crate::header::Header;
use crate::name::Name;
use crate::resource_record::ResourceRecord;
use crate::types::{CLASS_IN, TYPE_A};
use crate::utils::domain_to_qname;
use std::net::Ipv4Addr;

// <6>google<3>com<0> = google.com.
const DEFAULT_QNAME: [u8; 12] = [0x06, 0x67, 0x6F, 0x6F, 0x67, 0x6C, 0x65, 0x03, 0x63, 0x6F, 0x6D, 0x00];
pub const DEFAULT_ADDRESS: Ipv4Addr = Ipv4Addr::new(142, 251, 16, 102);

/// The A record every reply carries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedAnswer {
    qname: Vec<u8>,
    rdata: [u8; 4],
    ttl: u32,
}

impl FixedAnswer {
    pub fn new(domain: &str, address: Ipv4Addr, ttl: u32) -> Result<Self> {
        let qname = domain_to_qname(domain)?;

        Ok(Self {
            qname,
            rdata: address.octets(),
            ttl,
        })
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.rdata)
    }

    pub fn record(&self) -> Result<ResourceRecord<'_>> {
        let name = Name::parse(&self.qname, 0)?;

        Ok(ResourceRecord {
            name,
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl: self.ttl,
            rdata: &self.rdata,
        })
    }
}

impl Default for FixedAnswer {
    fn default() -> Self {
        Self {
            qname: DEFAULT_QNAME.to_vec(),
            rdata: DEFAULT_ADDRESS.octets(),
            ttl: 0, // no caching
        }
    }
}

pub struct Reply<'a> {
    header: Header,
    answer: &'a FixedAnswer,
}

impl<'a> Reply<'a> {
    pub fn new(id: u16, answer: &'a FixedAnswer) -> Self {
        let header = Header {
            ancount: 1,
            ..Header::reply(id)
        };

        Self { header, answer }
    }

    pub fn recursion_desired(mut self, rd: bool) -> Self {
        self.header.rd = rd;
        self
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        self.header.write_to(bytes)?;
        self.answer.record()?.write_to(bytes)?;

        Ok(())
    }
}
