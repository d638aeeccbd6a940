//! The `regex` rule
//!
//! Patterns are compiled once at rule-compile time and matched against the
//! whole input. Compilation failures do not abort the compile: the rule
//! becomes a validator that reports `string.regex.invalidPattern` on every
//! call.

use std::borrow::Cow;

use regex::Regex;

use super::{Reporter, fail_with};
use crate::foundation::{Param, Validator, Value, codes};

/// Inputs longer than this many bytes are rejected before matching.
pub const MAX_REGEX_INPUT: usize = 10_000;

/// Anchors `pattern` so it must match the entire input.
///
/// Already anchored patterns and the empty pattern are returned unchanged;
/// anything else is wrapped as `^(?:pattern)$` so alternations stay anchored
/// on both ends.
#[must_use]
pub fn anchor_pattern(pattern: &str) -> Cow<'_, str> {
    if pattern.is_empty() || (pattern.starts_with('^') && ends_with_anchor(pattern)) {
        return Cow::Borrowed(pattern);
    }
    Cow::Owned(format!("^(?:{pattern})$"))
}

/// `true` when the pattern ends in a `$` that is not escaped.
fn ends_with_anchor(pattern: &str) -> bool {
    let Some(body) = pattern.strip_suffix('$') else {
        return false;
    };
    let backslashes = body.bytes().rev().take_while(|&b| b == b'\\').count();
    backslashes % 2 == 0
}

pub(super) fn regex(r: &Reporter, pattern: &str) -> Validator {
    let compiled = match Regex::new(&anchor_pattern(pattern)) {
        Ok(re) => re,
        Err(err) => {
            tracing::debug!(pattern, error = %err, "invalid regex pattern");
            let invalid = r.fail(
                codes::STRING_REGEX_INVALID_PATTERN,
                Some(Param::from(pattern)),
            );
            return Validator::new(move |_| fail_with(&invalid));
        }
    };

    let type_err = r.fail(codes::STRING_TYPE, None);
    let too_long = r.fail(codes::STRING_REGEX_INPUT_TOO_LONG, Some(Param::from(MAX_REGEX_INPUT)));
    let no_match = r.fail(codes::STRING_REGEX_NO_MATCH, Some(Param::from(pattern)));

    Validator::new(move |value| match value {
        Value::Str(s) if s.len() > MAX_REGEX_INPUT => fail_with(&too_long),
        Value::Str(s) if compiled.is_match(s) => Ok(()),
        Value::Str(_) => fail_with(&no_match),
        _ => fail_with(&type_err),
    })
}
