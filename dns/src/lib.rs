// https://datatracker.ietf.org/doc/html/rfc1035#section-4

mod error;
mod header;
mod message;
mod name;
mod question;
mod reply;
mod request_message;
mod resource_record;
mod types;
mod utils;

use std::io::Cursor;

pub use error::{DnsError, Result, Section};
pub use header::{Header, HEADER_SIZE};
pub use message::{Limits, Message, SectionOverflow};
pub use name::{Labels, Name, MAX_LABEL_SIZE, MAX_NAME_SIZE};
pub use question::Question;
pub use reply::{FixedAnswer, Reply, DEFAULT_ADDRESS};
pub use resource_record::ResourceRecord;
pub use types::{class_name, type_from_name, type_name, CLASS_IN, TYPE_A, TYPE_CNAME, TYPE_MX, TYPE_NS, TYPE_PTR, TYPE_SOA, TYPE_TXT};
pub use utils::hex_dump;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_UDP_SIZE: usize = 512;

pub fn decode_header(buffer: &[u8]) -> Result<Header> {
    Header::parse_from_reader(&mut Cursor::new(buffer))
}

/// Writes the 12 header bytes at `offset`, returns the offset after them.
pub fn encode_header(header: &Header, out: &mut Vec<u8>, offset: usize) -> Result<usize> {
    write_at(out, offset, |wtr| header.write_to(wtr))
}

/// Dotted form of the name at the start of `buffer` and its encoded length.
pub fn decode_name(buffer: &[u8]) -> Result<(String, usize)> {
    let name = Name::parse(buffer, 0)?;
    Ok((name.to_string(), name.encoded_len()))
}

pub fn encode_name(domain: &str) -> Result<Vec<u8>> {
    utils::domain_to_qname(domain)
}

pub fn decode_question(buffer: &[u8]) -> Result<Question<'_>> {
    decode_question_at(buffer, 0).map(|(q, _)| q)
}

/// Decodes the question at `offset`; compression pointers resolve against
/// the whole of `message`. Returns the question and the offset after it.
pub fn decode_question_at(message: &[u8], offset: usize) -> Result<(Question<'_>, usize)> {
    let mut reader = Cursor::new(message);
    reader.set_position(offset as u64);
    let q = Question::parse_from_reader(&mut reader)?;
    Ok((q, reader.position() as usize))
}

pub fn encode_question(question: &Question<'_>, out: &mut Vec<u8>, offset: usize) -> Result<usize> {
    write_at(out, offset, |wtr| question.write_to(wtr))
}

pub fn decode_resource(buffer: &[u8]) -> Result<ResourceRecord<'_>> {
    decode_resource_at(buffer, 0).map(|(r, _)| r)
}

pub fn decode_resource_at(message: &[u8], offset: usize) -> Result<(ResourceRecord<'_>, usize)> {
    let mut reader = Cursor::new(message);
    reader.set_position(offset as u64);
    let r = ResourceRecord::parse_from_reader(&mut reader)?;
    Ok((r, reader.position() as usize))
}

pub fn encode_resource(record: &ResourceRecord<'_>, out: &mut Vec<u8>, offset: usize) -> Result<usize> {
    write_at(out, offset, |wtr| record.write_to(wtr))
}

pub fn decode_message(buffer: &[u8]) -> Result<Message<'_>> {
    Message::parse(buffer, &Limits::default())
}

pub fn decode_message_with_limits<'a>(buffer: &'a [u8], limits: &Limits) -> Result<Message<'a>> {
    Message::parse(buffer, limits)
}

/// The demonstration reply: `google.com. 0 IN A 142.251.16.102` answering `header_id`.
pub fn encode_reply(header_id: u16) -> Result<Vec<u8>> {
    let answer = FixedAnswer::default();
    let mut reply_bytes: Vec<u8> = vec![];
    Reply::new(header_id, &answer).to_bytes(&mut reply_bytes)?;

    Ok(reply_bytes)
}

pub fn encode_query(id: u16, domain: &str, qtype: u16) -> Result<Vec<u8>> {
    let request_msg = request_message::RequestMessage::new(id, domain, qtype)?;
    let mut request_bytes: Vec<u8> = vec![];
    request_msg.to_bytes(&mut request_bytes)?;

    Ok(request_bytes)
}

// Bytes already in `out` at the written span are overwritten, the buffer
// grows as needed.
fn write_at<F>(out: &mut Vec<u8>, offset: usize, f: F) -> Result<usize>
where
    F: FnOnce(&mut Cursor<&mut Vec<u8>>) -> Result<()>,
{
    let mut wtr = Cursor::new(out);
    wtr.set_position(offset as u64);
    f(&mut wtr)?;
    Ok(wtr.position() as usize)
}
