//! Engine-level errors

use thiserror::Error;

use crate::foundation::Errors;
use crate::rule::TagError;

/// Errors returned by [`Engine`](super::Engine) entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `from_rules` was given no tokens.
    #[error("empty rules")]
    EmptyRules,

    /// The tag did not parse.
    #[error("invalid tag {tag:?}: {source}")]
    Parse {
        /// The tag as it was compiled (tokens re-joined with `;`).
        tag: String,
        source: TagError,
    },

    /// The struct walker was given something other than a struct.
    #[error("expected struct, got {found}")]
    NotAStruct { found: String },

    /// Validation ran and found failures.
    #[error(transparent)]
    Invalid(#[from] Errors),
}

impl EngineError {
    /// The validation failures, if this is [`EngineError::Invalid`].
    #[must_use]
    pub const fn errors(&self) -> Option<&Errors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_errors(self) -> Option<Errors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
