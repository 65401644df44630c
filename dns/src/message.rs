use crate::error::{DnsError, Result, Section};
use crate::header::Header;
use crate::question::Question;
use crate::resource_record::ResourceRecord;
use std::io::Cursor;

/// Upper bounds on how many records of each section are kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    pub max_questions: usize,
    pub max_answers: usize,
    pub max_authorities: usize,
    pub max_additionals: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_questions: 10,
            max_answers: 10,
            max_authorities: 10,
            max_additionals: 10,
        }
    }
}

/// A section whose header count was larger than its limit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SectionOverflow {
    pub section: Section,
    pub declared: u16,
    pub decoded: usize,
}

//     +---------------------+
//     |        Header       |
//     +---------------------+
//     |       Question      |
//     +---------------------+
//     |        Answer       |
//     +---------------------+
//     |      Authority      |
//     +---------------------+
//     |      Additional     |
//     +---------------------+
#[derive(Debug)]
pub struct Message<'a> {
    pub header: Header,
    pub questions: Vec<Question<'a>>,
    pub answers: Vec<ResourceRecord<'a>>,
    pub authorities: Vec<ResourceRecord<'a>>,
    pub additionals: Vec<ResourceRecord<'a>>,
    overflows: Vec<SectionOverflow>,
}

impl<'a> Message<'a> {
    pub fn parse(message: &'a [u8], limits: &Limits) -> Result<Self> {
        let mut reader = Cursor::new(message);
        let mut overflows = Vec::new();

        let header = Header::parse_from_reader(&mut reader)?;

        let questions = read_section(
            &mut reader,
            Section::Question,
            header.qdcount,
            limits.max_questions,
            &mut overflows,
            Question::parse_from_reader,
        )?;
        let answers = read_section(
            &mut reader,
            Section::Answer,
            header.ancount,
            limits.max_answers,
            &mut overflows,
            ResourceRecord::parse_from_reader,
        )?;
        let authorities = read_section(
            &mut reader,
            Section::Authority,
            header.nscount,
            limits.max_authorities,
            &mut overflows,
            ResourceRecord::parse_from_reader,
        )?;
        let additionals = read_section(
            &mut reader,
            Section::Additional,
            header.arcount,
            limits.max_additionals,
            &mut overflows,
            ResourceRecord::parse_from_reader,
        )?;

        let msg = Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
            overflows,
        };

        Ok(msg)
    }

    /// Sections that held more records than the limits allowed to keep.
    pub fn overflows(&self) -> &[SectionOverflow] {
        &self.overflows
    }

    pub fn is_truncated(&self) -> bool {
        !self.overflows.is_empty()
    }

    /// Fails with `SectionCountOverflow` when any section was cut short.
    pub fn ensure_complete(&self) -> Result<()> {
        match self.overflows.first() {
            None => Ok(()),
            Some(o) => Err(DnsError::SectionCountOverflow {
                section: o.section,
                declared: o.declared,
                max: o.decoded,
            }),
        }
    }

    /// Serializes the records held by this message, names uncompressed.
    /// The header counts are taken from the section lengths.
    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        let header = Header {
            qdcount: section_count(Section::Question, self.questions.len())?,
            ancount: section_count(Section::Answer, self.answers.len())?,
            nscount: section_count(Section::Authority, self.authorities.len())?,
            arcount: section_count(Section::Additional, self.additionals.len())?,
            ..self.header.clone()
        };

        header.write_to(bytes)?;
        for q in &self.questions {
            q.write_to(bytes)?;
        }
        for r in self.answers.iter().chain(&self.authorities).chain(&self.additionals) {
            r.write_to(bytes)?;
        }

        Ok(())
    }
}

// Every declared record is parsed so the cursor lands on the next section,
// only the first `max` are kept.
fn read_section<'a, T, F>(
    reader: &mut Cursor<&'a [u8]>,
    section: Section,
    declared: u16,
    max: usize,
    overflows: &mut Vec<SectionOverflow>,
    parse: F,
) -> Result<Vec<T>>
where
    F: Fn(&mut Cursor<&'a [u8]>) -> Result<T>,
{
    let keep = usize::from(declared).min(max);
    let mut records = Vec::with_capacity(keep);

    for i in 0..usize::from(declared) {
        let record = parse(reader)?;
        if i < keep {
            records.push(record);
        }
    }

    if usize::from(declared) > keep {
        overflows.push(SectionOverflow {
            section,
            declared,
            decoded: keep,
        });
    }

    Ok(records)
}

fn section_count(section: Section, len: usize) -> Result<u16> {
    if len > usize::from(u16::MAX) {
        return Err(DnsError::SectionCountOverflow {
            section,
            declared: u16::MAX,
            max: len,
        });
    }
    Ok(len as u16)
}
