//! The `ulid` rule: 26 characters of upper-case Crockford base32.

use crate::compiler::Compiler;
use crate::foundation::Validator;

pub const KIND: &str = "ulid";

pub const CODE_INVALID: &str = "string.ulid.invalid";

const DEFAULT_MESSAGE: &str = "invalid ULID format";

pub const TRANSLATIONS: &[(&str, &str)] = &[(CODE_INVALID, DEFAULT_MESSAGE)];

const LEN: usize = 26;

/// `true` for 26 characters from `0-9A-Z` minus `I`, `L`, `O` and `U`.
#[must_use]
pub fn is_ulid(s: &str) -> bool {
    s.len() == LEN && s.bytes().all(is_crockford)
}

const fn is_crockford(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'A'..=b'Z') && !matches!(b, b'I' | b'L' | b'O' | b'U')
}

pub(super) fn compile(c: &Compiler) -> Validator {
    super::string_rule(c, CODE_INVALID, DEFAULT_MESSAGE, |s| {
        if is_ulid(s) { Ok(()) } else { Err(None) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5FAV", true)]
    #[case("7ZZZZZZZZZZZZZZZZZZZZZZZZZ", true)]
    #[case("01arz3ndektsv4rrffq69g5fav", false)]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5FA", false)]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5FAVX", false)]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5FAI", false)]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5FAU", false)]
    #[case("01ARZ3NDEKTSV4RRFFQ69G5-AV", false)]
    fn format(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_ulid(input), expected);
    }

    #[test]
    fn validator_reports_invalid() {
        let v = compile(&Compiler::new());
        assert!(v.validate("01ARZ3NDEKTSV4RRFFQ69G5FAV").is_ok());
        let errors = v.validate("01ARZ3NDEKTSV4RRFFQ69G5FAO").unwrap_err();
        assert_eq!(errors.first().unwrap().code, CODE_INVALID);
        assert!(v.validate(&true).is_err());
    }
}
