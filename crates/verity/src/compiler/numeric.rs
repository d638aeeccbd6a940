//! Integer rules
//!
//! `int` accepts any native width. `int64` is the exact mode and accepts only
//! a verbatim `i64`. The bound rules normalize to `i64` and reject values
//! that do not fit (unsigned above `i64::MAX`), floats, and strings.

use super::{Bound, Reporter, fail_with};
use crate::foundation::{Param, Validator, Value, codes};

pub(super) fn is_int(r: &Reporter) -> Validator {
    let type_err = r.fail(codes::INT_TYPE, None);
    Validator::new(move |value| match value {
        Value::Int(_) => Ok(()),
        _ => fail_with(&type_err),
    })
}

pub(super) fn is_int64(r: &Reporter) -> Validator {
    let type_err = r.fail(codes::INT64_TYPE, None);
    Validator::new(move |value| match value {
        Value::Int(n) if n.is_i64() => Ok(()),
        _ => fail_with(&type_err),
    })
}

pub(super) fn int_bound(r: &Reporter, bound: Bound, n: i64) -> Validator {
    let code = if bound == Bound::Max {
        codes::INT_MAX
    } else {
        codes::INT_MIN
    };
    let type_err = r.fail(codes::INT_TYPE, None);
    let bound_err = r.fail(code, Some(Param::Int(n)));

    Validator::new(move |value| {
        let Some(actual) = value.as_integer().and_then(|i| i.to_i64()) else {
            return fail_with(&type_err);
        };
        if bound.holds(actual, n) {
            Ok(())
        } else {
            fail_with(&bound_err)
        }
    })
}
