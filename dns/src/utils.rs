use crate::error::{DnsError, Result};
use crate::name::{MAX_LABEL_SIZE, MAX_NAME_SIZE};
use std::fmt::Write;

// Dotted form to length-prefixed labels ending in 0. Accepts the escapes
// `Name` prints: `\.`, `\\` and `\DDD`.
pub fn domain_to_qname(domain: &str) -> Result<Vec<u8>> {
    let labels = split_labels(domain)?;

    let mut qname: Vec<u8> = Vec::with_capacity(domain.len() + 2);
    for label in &labels {
        if label.len() > MAX_LABEL_SIZE {
            return Err(DnsError::InvalidName(format!(
                "label in '{}' longer than {} octets",
                domain, MAX_LABEL_SIZE
            )));
        }

        qname.push(label.len() as u8);
        qname.extend_from_slice(label);
    }

    qname.push(0);

    if qname.len() > MAX_NAME_SIZE {
        return Err(DnsError::InvalidName(format!(
            "'{}' longer than {} octets",
            domain, MAX_NAME_SIZE
        )));
    }

    Ok(qname)
}

fn split_labels(domain: &str) -> Result<Vec<Vec<u8>>> {
    let invalid = |what: &str| DnsError::InvalidName(format!("{} in '{}'", what, domain));

    let bytes = domain.as_bytes();
    let mut labels = Vec::new();
    if bytes.is_empty() || bytes == b"." {
        return Ok(labels);
    }

    let mut label = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                if label.is_empty() {
                    return Err(invalid("empty label"));
                }
                labels.push(std::mem::take(&mut label));
                i += 1;
            }
            b'\\' => match bytes.get(i + 1..i + 4) {
                Some(digits) if digits.iter().all(u8::is_ascii_digit) => {
                    let value = digits
                        .iter()
                        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
                    if value > 255 {
                        return Err(invalid("escape above \\255"));
                    }
                    label.push(value as u8);
                    i += 4;
                }
                _ => {
                    let escaped = *bytes.get(i + 1).ok_or_else(|| invalid("trailing backslash"))?;
                    label.push(escaped);
                    i += 2;
                }
            },
            b => {
                label.push(b);
                i += 1;
            }
        }
    }

    if !label.is_empty() {
        labels.push(label);
    }

    Ok(labels)
}

// two hex digits per byte, space separated
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02X}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_to_qname_test() {
        let expected: [u8; 11] = [5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0];

        assert_eq!(domain_to_qname("baidu.com").unwrap(), expected);
        assert_eq!(domain_to_qname("baidu.com.").unwrap(), expected);
        assert_eq!(domain_to_qname(".").unwrap(), vec![0u8]);
        assert_eq!(domain_to_qname("").unwrap(), vec![0u8]);
    }

    #[test]
    fn domain_to_qname_rejects_test() {
        assert!(domain_to_qname("a..com").is_err());
        assert!(domain_to_qname("..").is_err());

        let long_label = "a".repeat(64);
        assert!(domain_to_qname(&long_label).is_err());
        assert!(domain_to_qname(&"a".repeat(63)).is_ok());

        let long_name = vec!["b".repeat(63); 4].join(".");
        assert!(domain_to_qname(&long_name).is_err());
    }

    #[test]
    fn escapes_test() {
        assert_eq!(domain_to_qname("a\\.b.c").unwrap(), vec![3, b'a', b'.', b'b', 1, b'c', 0]);
        assert_eq!(domain_to_qname("\\255A.").unwrap(), vec![2, 0xFF, b'A', 0]);
        assert_eq!(domain_to_qname("\\\\x").unwrap(), vec![2, b'\\', b'x', 0]);
        assert_eq!(domain_to_qname("\\032").unwrap(), vec![1, b' ', 0]);

        assert!(domain_to_qname("\\256").is_err());
        assert!(domain_to_qname("abc\\").is_err());
    }

    #[test]
    fn hex_dump_test() {
        assert_eq!(hex_dump(&[0x8E, 0xFB, 0x10, 0x66]), "8E FB 10 66");
        assert_eq!(hex_dump(&[0x06, 0x00]), "06 00");
        assert_eq!(hex_dump(&[]), "");
    }
}
