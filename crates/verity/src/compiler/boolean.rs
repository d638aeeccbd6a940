//! The `bool` rule

use super::{Reporter, fail_with};
use crate::foundation::{Validator, Value, codes};

pub(super) fn is_bool(r: &Reporter) -> Validator {
    let type_err = r.fail(codes::BOOL_TYPE, None);
    Validator::new(move |value| match value {
        Value::Bool(_) => Ok(()),
        _ => fail_with(&type_err),
    })
}
