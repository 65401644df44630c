// https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2

pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;

pub const CLASS_IN: u16 = 1;

pub fn type_name(rtype: u16) -> &'static str {
    match rtype {
        1 => "A",
        2 => "NS",
        3 => "MD",
        4 => "MF",
        5 => "CNAME",
        6 => "SOA",
        7 => "MB",
        8 => "MG",
        9 => "MR",
        10 => "NULL",
        11 => "WKS",
        12 => "PTR",
        13 => "HINFO",
        14 => "MINFO",
        15 => "MX",
        16 => "TXT",
        252 => "AXFR",
        253 => "MAILB",
        254 => "MAILA",
        255 => "*",
        _ => "Unknown",
    }
}

pub fn class_name(rclass: u16) -> &'static str {
    match rclass {
        1 => "IN",
        2 => "CSNET",
        3 => "CHAOS",
        4 => "Hesiod",
        255 => "*",
        _ => "Unknown",
    }
}

/// Inverse of [`type_name`], case-insensitive.
pub fn type_from_name(name: &str) -> Option<u16> {
    (0..=255u16)
        .find(|t| type_name(*t) != "Unknown" && type_name(*t).eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_test() {
        assert_eq!(type_name(TYPE_A), "A");
        assert_eq!(type_name(TYPE_MX), "MX");
        assert_eq!(type_name(252), "AXFR");
        assert_eq!(type_name(255), "*");
        assert_eq!(type_name(0), "Unknown");
        assert_eq!(type_name(17), "Unknown");
        assert_eq!(type_name(28), "Unknown");
        assert_eq!(type_name(9999), "Unknown");
    }

    #[test]
    fn class_name_test() {
        assert_eq!(class_name(CLASS_IN), "IN");
        assert_eq!(class_name(3), "CHAOS");
        assert_eq!(class_name(4), "Hesiod");
        assert_eq!(class_name(255), "*");
        assert_eq!(class_name(5), "Unknown");
    }

    #[test]
    fn tables_are_total_test() {
        let known_types = (0..=u16::MAX).filter(|t| type_name(*t) != "Unknown").count();
        let known_classes = (0..=u16::MAX).filter(|c| class_name(*c) != "Unknown").count();

        assert_eq!(known_types, 20);
        assert_eq!(known_classes, 5);
    }

    #[test]
    fn type_from_name_test() {
        assert_eq!(type_from_name("a"), Some(TYPE_A));
        assert_eq!(type_from_name("CNAME"), Some(TYPE_CNAME));
        assert_eq!(type_from_name("*"), Some(255));
        assert_eq!(type_from_name("AAAA"), None);
        assert_eq!(type_from_name("Unknown"), None);
    }
}
