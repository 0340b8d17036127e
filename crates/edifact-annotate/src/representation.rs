//! Representation-class parsing and validation: dictionary representation
//! strings of the form `a<len>`, `n<len>`, `an<len>`, or the same with a
//! `..` prefix on the length meaning "up to".

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// `a` — letters only.
    Alpha,
    /// `n` — digits, optionally with a decimal mark or sign.
    Numeric,
    /// `an` — alphanumeric.
    AlphaNumeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Exact length required.
    Exact(usize),
    /// `..n` — length must not exceed `n`.
    UpTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Representation {
    pub class: Class,
    pub length: Length,
}

/// Parses a representation string: splits on `".."` when present (length
/// is "up to" the number after it), otherwise splits at the first digit
/// (length is exact).
pub fn parse(representation: &str) -> Option<Representation> {
    let (prefix, len_str, up_to) = if let Some(idx) = representation.find("..") {
        (&representation[..idx], &representation[idx + 2..], true)
    } else {
        let split = representation.find(|c: char| c.is_ascii_digit())?;
        (&representation[..split], &representation[split..], false)
    };

    let class = match prefix {
        "a" => Class::Alpha,
        "n" => Class::Numeric,
        "an" => Class::AlphaNumeric,
        _ => return None,
    };
    let len: usize = len_str.parse().ok()?;
    let length = if up_to { Length::UpTo(len) } else { Length::Exact(len) };
    Some(Representation { class, length })
}

/// One validation failure against a [`Representation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongClass,
    WrongLength { expected: Length, actual: usize },
}

/// Validates `component` against `representation`'s class and length.
pub fn validate(component: &str, representation: &Representation) -> Vec<Violation> {
    let mut violations = Vec::new();

    let class_ok = match representation.class {
        Class::Alpha => component.chars().all(|c| c.is_ascii_alphabetic()),
        Class::Numeric => component
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-'),
        Class::AlphaNumeric => component.chars().all(|c| c.is_ascii_alphanumeric()),
    };
    if !class_ok {
        violations.push(Violation::WrongClass);
    }

    let len = component.chars().count();
    let length_ok = match representation.length {
        Length::Exact(n) => len == n,
        Length::UpTo(n) => len <= n,
    };
    if !length_ok {
        violations.push(Violation::WrongLength {
            expected: representation.length,
            actual: len,
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_alpha() {
        let r = parse("a3").unwrap();
        assert_eq!(r.class, Class::Alpha);
        assert_eq!(r.length, Length::Exact(3));
    }

    #[test]
    fn test_parse_upto_alphanumeric() {
        let r = parse("an..35").unwrap();
        assert_eq!(r.class, Class::AlphaNumeric);
        assert_eq!(r.length, Length::UpTo(35));
    }

    #[test]
    fn test_parse_upto_numeric() {
        let r = parse("n..17").unwrap();
        assert_eq!(r.class, Class::Numeric);
        assert_eq!(r.length, Length::UpTo(17));
    }

    #[test]
    fn test_parse_invalid_class() {
        assert!(parse("x3").is_none());
    }

    #[test]
    fn test_validate_exact_ok() {
        let r = parse("a3").unwrap();
        assert!(validate("ABC", &r).is_empty());
    }

    #[test]
    fn test_validate_wrong_class() {
        let r = parse("a3").unwrap();
        let violations = validate("AB1", &r);
        assert!(violations.contains(&Violation::WrongClass));
    }

    #[test]
    fn test_validate_wrong_length_upto() {
        let r = parse("an..3").unwrap();
        let violations = validate("TOOLONG", &r);
        assert!(matches!(
            violations[0],
            Violation::WrongLength { expected: Length::UpTo(3), actual: 7 }
        ));
    }

    #[test]
    fn test_validate_numeric_allows_decimal() {
        let r = parse("n..10").unwrap();
        assert!(validate("12.50", &r).is_empty());
    }
}
