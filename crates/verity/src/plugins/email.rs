//! The `email` rule
//!
//! Accepts a bare `local@domain` address (no display name, no quoted local
//! part). Surrounding whitespace is ignored. The failure code is always
//! `string.email.invalid`; the specific [`EmailFault`] code travels as the
//! error param.

use thiserror::Error;

use crate::compiler::Compiler;
use crate::foundation::{Param, Validator};

pub const KIND: &str = "email";

pub const CODE_INVALID: &str = "string.email.invalid";

const DEFAULT_MESSAGE: &str = "invalid email format";

const MAX_LEN: usize = 255;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

pub const TRANSLATIONS: &[(&str, &str)] = &[
    (CODE_INVALID, DEFAULT_MESSAGE),
    ("string.email.tooLong", "email is too long"),
    ("string.email.empty", "email cannot be empty"),
    ("string.email.format", "invalid email format"),
    ("string.email.localLength", "local part length is invalid"),
    ("string.email.domainLength", "domain length is invalid"),
    ("string.email.localDots", "local part cannot start or end with '.'"),
    ("string.email.domainLabels", "domain must have at least two labels"),
    ("string.email.domainLabelLength", "domain label length is invalid"),
    ("string.email.domainChars", "domain contains invalid characters"),
    ("string.email.domainHyphen", "domain label cannot start or end with '-'"),
    ("string.email.tld", "top-level domain is too short"),
];

/// Why an address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailFault {
    #[error("email cannot be empty")]
    Empty,
    #[error("email is too long")]
    TooLong,
    #[error("invalid email format")]
    Format,
    #[error("local part length is invalid")]
    LocalLength,
    #[error("domain length is invalid")]
    DomainLength,
    #[error("local part cannot start or end with '.'")]
    LocalDots,
    #[error("domain must have at least two labels")]
    DomainLabels,
    #[error("domain label length is invalid")]
    DomainLabelLength,
    #[error("domain contains invalid characters")]
    DomainChars,
    #[error("domain label cannot start or end with '-'")]
    DomainHyphen,
    #[error("top-level domain is too short")]
    Tld,
}

impl EmailFault {
    /// The fine-grained message key for this fault.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Empty => "string.email.empty",
            Self::TooLong => "string.email.tooLong",
            Self::Format => "string.email.format",
            Self::LocalLength => "string.email.localLength",
            Self::DomainLength => "string.email.domainLength",
            Self::LocalDots => "string.email.localDots",
            Self::DomainLabels => "string.email.domainLabels",
            Self::DomainLabelLength => "string.email.domainLabelLength",
            Self::DomainChars => "string.email.domainChars",
            Self::DomainHyphen => "string.email.domainHyphen",
            Self::Tld => "string.email.tld",
        }
    }
}

/// Checks one address.
pub fn check(input: &str) -> Result<(), EmailFault> {
    let s = input.trim();
    if s.is_empty() {
        return Err(EmailFault::Empty);
    }
    if s.len() > MAX_LEN {
        return Err(EmailFault::TooLong);
    }
    let (local, domain) = match s.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => return Err(EmailFault::Format),
    };

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return Err(EmailFault::LocalLength);
    }
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(EmailFault::DomainLength);
    }
    if local.starts_with('.') || local.ends_with('.') {
        return Err(EmailFault::LocalDots);
    }
    if local.split('.').any(|atom| atom.is_empty() || !atom.chars().all(is_atext)) {
        return Err(EmailFault::Format);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(EmailFault::DomainLabels);
    }
    for label in &labels {
        check_label(label)?;
    }
    match labels.last() {
        Some(tld) if tld.chars().count() >= 2 => Ok(()),
        _ => Err(EmailFault::Tld),
    }
}

fn check_label(label: &str) -> Result<(), EmailFault> {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return Err(EmailFault::DomainLabelLength);
    }
    if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(EmailFault::DomainChars);
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(EmailFault::DomainHyphen);
    }
    Ok(())
}

/// RFC 5322 `atext`, extended to non-ASCII letters and digits.
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || "!#$%&'*+-/=?^_`{|}~".contains(c)
        || (!c.is_ascii() && c.is_alphanumeric())
}

pub(super) fn compile(c: &Compiler) -> Validator {
    super::string_rule(c, CODE_INVALID, DEFAULT_MESSAGE, |s| {
        check(s).map_err(|fault| Some(Param::from(fault.code())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::codes;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com")]
    #[case("  ada.lovelace+tag@mail.example.co.uk ")]
    #[case("o'brien@example.ie")]
    #[case("user@xn--bcher-kva.example")]
    #[case("ü@münchen.de")]
    fn accepts(#[case] input: &str) {
        assert_eq!(check(input), Ok(()));
    }

    #[rstest]
    #[case("", EmailFault::Empty)]
    #[case("   ", EmailFault::Empty)]
    #[case("a@b@c.com", EmailFault::Format)]
    #[case("no-at-sign", EmailFault::Format)]
    #[case("Ada <ada@example.com>", EmailFault::Format)]
    #[case("@example.com", EmailFault::LocalLength)]
    #[case("ada@", EmailFault::DomainLength)]
    #[case(".ada@example.com", EmailFault::LocalDots)]
    #[case("ada.@example.com", EmailFault::LocalDots)]
    #[case("a..da@example.com", EmailFault::Format)]
    #[case("ada@localhost", EmailFault::DomainLabels)]
    #[case("ada@example..com", EmailFault::DomainLabelLength)]
    #[case("ada@exa_mple.com", EmailFault::DomainChars)]
    #[case("ada@-example.com", EmailFault::DomainHyphen)]
    #[case("ada@example.c", EmailFault::Tld)]
    fn rejects(#[case] input: &str, #[case] fault: EmailFault) {
        assert_eq!(check(input), Err(fault));
    }

    #[test]
    fn length_limits() {
        let long_local = format!("{}@example.com", "a".repeat(MAX_LOCAL_LEN + 1));
        assert_eq!(check(&long_local), Err(EmailFault::LocalLength));

        let long_label = format!("ada@{}.com", "a".repeat(MAX_LABEL_LEN + 1));
        assert_eq!(check(&long_label), Err(EmailFault::DomainLabelLength));

        let too_long = format!("ada@{}.com", "a".repeat(MAX_LEN));
        assert_eq!(check(&too_long), Err(EmailFault::TooLong));
    }

    #[test]
    fn validator_reports_invalid_with_fault_param() {
        let v = compile(&Compiler::new());
        assert!(v.validate("ada@example.com").is_ok());

        let errors = v.validate("ada@localhost").unwrap_err();
        let e = errors.first().unwrap();
        assert_eq!(e.code, CODE_INVALID);
        assert_eq!(e.message, DEFAULT_MESSAGE);
        assert_eq!(e.param, Some(Param::from("string.email.domainLabels")));

        let errors = v.validate(&42).unwrap_err();
        assert_eq!(errors.first().unwrap().code, codes::STRING_TYPE);
    }

    #[test]
    fn faults_render_their_message() {
        assert_eq!(EmailFault::Tld.to_string(), "top-level domain is too short");
        assert_eq!(EmailFault::Tld.code(), "string.email.tld");
    }
}
