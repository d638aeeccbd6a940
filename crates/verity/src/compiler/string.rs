//! String rules: type, byte length, rune count, membership

use super::{Bound, Reporter, fail_with, len_i64};
use crate::foundation::{Param, Validator, Value, codes};

pub(super) fn is_string(r: &Reporter) -> Validator {
    let type_err = r.fail(codes::STRING_TYPE, None);
    Validator::new(move |value| match value {
        Value::Str(_) => Ok(()),
        _ => fail_with(&type_err),
    })
}

const fn byte_code(bound: Bound) -> &'static str {
    match bound {
        Bound::Exact => codes::STRING_LENGTH,
        Bound::Min => codes::STRING_MIN,
        Bound::Max => codes::STRING_MAX,
    }
}

/// Compares `str::len` (bytes) against `n`.
pub(super) fn byte_length(r: &Reporter, bound: Bound, n: i64) -> Validator {
    measured(r, byte_code(bound), bound, n, str::len)
}

/// Compares the `char` count against `n`.
pub(super) fn rune_count(r: &Reporter, bound: Bound, n: i64) -> Validator {
    let code = if bound == Bound::Max {
        codes::STRING_MAX_RUNES
    } else {
        codes::STRING_MIN_RUNES
    };
    measured(r, code, bound, n, |s| s.chars().count())
}

fn measured(
    r: &Reporter,
    code: &'static str,
    bound: Bound,
    n: i64,
    measure: fn(&str) -> usize,
) -> Validator {
    let type_err = r.fail(codes::STRING_TYPE, None);
    let bound_err = r.fail(code, Some(Param::Int(n)));
    Validator::new(move |value| match value {
        Value::Str(s) if bound.holds(len_i64(measure(s)), n) => Ok(()),
        Value::Str(_) => fail_with(&bound_err),
        _ => fail_with(&type_err),
    })
}

/// The set is sorted before the message is built, matching its cache key.
pub(super) fn one_of(r: &Reporter, values: &[String]) -> Validator {
    let mut values = values.to_vec();
    values.sort_unstable();
    values.dedup();

    let type_err = r.fail(codes::STRING_TYPE, None);
    let miss_err = r.fail(codes::STRING_ONE_OF, Some(Param::Str(values.join(", "))));
    Validator::new(move |value| match value {
        Value::Str(s) if values.iter().any(|v| v == s) => Ok(()),
        Value::Str(_) => fail_with(&miss_err),
        _ => fail_with(&type_err),
    })
}
