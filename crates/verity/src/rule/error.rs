//! Tag parse errors

use std::num::ParseIntError;

use thiserror::Error;

/// A malformed validation tag.
///
/// Segment text embedded in these errors is truncated to 50 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The first segment is not one of `string`, `int`, `int64`, `slice`, `bool`.
    #[error("unknown type: {ty}")]
    UnknownType { ty: String },

    /// A `)` without an opener, or an unclosed `(`.
    #[error("unbalanced parentheses in tag: {tag}")]
    UnbalancedParens { tag: String },

    /// A threshold that is not a base-10 integer.
    #[error("invalid {base} rule {segment}: {source}")]
    InvalidNumber {
        base: &'static str,
        segment: String,
        source: ParseIntError,
    },

    /// A key the base type does not recognize.
    #[error("unknown {base} rule: {segment}")]
    UnknownRule { base: &'static str, segment: String },

    #[error("foreach rules must be wrapped in parentheses: {inner}")]
    ForeachNotWrapped { inner: String },

    #[error("foreach must have at least one rule")]
    EmptyForeach,

    #[error("invalid foreach rules: {source}")]
    InvalidForeach { source: Box<TagError> },
}

const MAX_SEGMENT_BYTES: usize = 50;

/// Truncates `text` to at most 50 bytes on a char boundary, marking the cut.
pub(crate) fn truncate(text: &str) -> String {
    if text.len() <= MAX_SEGMENT_BYTES {
        return text.to_owned();
    }
    let mut end = MAX_SEGMENT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
