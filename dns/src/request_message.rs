use crate::error::Result;
use crate::header::Header;
use crate::types::CLASS_IN;
use crate::utils::domain_to_qname;
use byteorder::{WriteBytesExt, BE};

pub struct RequestMessage {
    header: Header,
    qname: Vec<u8>,
    qtype: u16,
}

impl RequestMessage {
    pub fn new(id: u16, domain: &str, qtype: u16) -> Result<Self> {
        let header = Header::query(id);
        let qname = domain_to_qname(domain)?;

        Ok(Self {
            header,
            qname,
            qtype,
        })
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        self.header.write_to(bytes)?;
        bytes.extend_from_slice(&self.qname);
        bytes.write_u16::<BE>(self.qtype)?;
        bytes.write_u16::<BE>(CLASS_IN)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bytes_test() {
        let mut bytes: Vec<u8> = vec![];

        let msg = RequestMessage::new(209 * 256 + 183, "baidu.com", 1).unwrap();
        msg.to_bytes(&mut bytes).unwrap();

        let expected: [u8; 27] = [
            209, 183, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, // header
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1, // question
        ];

        assert_eq!(bytes, expected);
    }

    #[test]
    fn invalid_domain_test() {
        assert!(RequestMessage::new(1, "a..b", 1).is_err());
    }
}
