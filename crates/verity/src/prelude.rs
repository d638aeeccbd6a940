//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use verity::prelude::*;
//!
//! let engine = Engine::new();
//! engine.check_tag("string;min=3", &"Alice")?;
//! ```

pub use crate::engine::{Engine, EngineConfig, EngineError, ValidateOpts};
pub use crate::foundation::{
    Errors, Field, FieldError, Param, SimpleTranslator, StructValue, ToValue, Translator,
    Validator, Value,
};
pub use crate::rule::{Kind, Rule};

#[cfg(feature = "derive")]
pub use verity_macros::Validate;
