//! The `uuid` rule: canonical 8-4-4-4-12 hex form, either case.

use crate::compiler::Compiler;
use crate::foundation::Validator;

pub const KIND: &str = "uuid";

pub const CODE_INVALID: &str = "string.uuid.invalid";

const DEFAULT_MESSAGE: &str = "invalid UUID format";

pub const TRANSLATIONS: &[(&str, &str)] = &[(CODE_INVALID, DEFAULT_MESSAGE)];

const LEN: usize = 36;
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// `true` for `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` with hex digits.
///
/// Version and variant nibbles are not checked.
#[must_use]
pub fn is_uuid(s: &str) -> bool {
    s.len() == LEN
        && s.bytes().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

pub(super) fn compile(c: &Compiler) -> Validator {
    super::string_rule(c, CODE_INVALID, DEFAULT_MESSAGE, |s| {
        if is_uuid(s) { Ok(()) } else { Err(None) }
    })
}
