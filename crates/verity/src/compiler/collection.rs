//! Sequence rules: type, length bounds, element-wise `forEach`

use super::{Bound, Reporter, fail_with, len_i64};
use crate::foundation::{Errors, Param, Validator, Value, codes};

pub(super) fn is_slice(r: &Reporter) -> Validator {
    let type_err = r.fail(codes::SLICE_TYPE, None);
    Validator::new(move |value| match value {
        Value::Seq(_) => Ok(()),
        _ => fail_with(&type_err),
    })
}

const fn length_code(bound: Bound) -> &'static str {
    match bound {
        Bound::Exact => codes::SLICE_LENGTH,
        Bound::Min => codes::SLICE_MIN,
        Bound::Max => codes::SLICE_MAX,
    }
}

pub(super) fn slice_length(r: &Reporter, bound: Bound, n: i64) -> Validator {
    let type_err = r.fail(codes::SLICE_TYPE, None);
    let bound_err = r.fail(length_code(bound), Some(Param::Int(n)));
    Validator::new(move |value| match value {
        Value::Seq(items) if bound.holds(len_i64(items.len()), n) => Ok(()),
        Value::Seq(_) => fail_with(&bound_err),
        _ => fail_with(&type_err),
    })
}

/// Runs `element` on every item, prefixing error paths with `[i]`.
///
/// Failures are collected across all elements, not just the first.
pub(super) fn for_each(r: &Reporter, element: Validator) -> Validator {
    let type_err = r.fail(codes::SLICE_TYPE, None);
    Validator::new(move |value| {
        let Value::Seq(items) = value else {
            return fail_with(&type_err);
        };
        let errors: Errors = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| element.validate_value(item).err().map(|e| e.at_index(i)))
            .flatten()
            .collect();
        errors.into_result()
    })
}
