use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum DnsError {
    #[error("malformed header: {len} bytes, need at least 12")]
    MalformedHeader { len: usize },

    #[error("malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("malformed question at offset {offset}")]
    MalformedQuestion { offset: usize },

    #[error("malformed resource record at offset {offset}")]
    MalformedResource { offset: usize },

    #[error("{section} section declares {declared} records, at most {max} supported")]
    SectionCountOverflow {
        section: Section,
        declared: u16,
        max: usize,
    },

    #[error("invalid domain name: {0}")]
    InvalidName(String),

    #[error("rdata of {0} bytes does not fit rdlength")]
    RdataTooLong(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
