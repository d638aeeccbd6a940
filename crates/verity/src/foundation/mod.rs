//! Foundation types shared by every layer
//!
//! - **Values**: [`Value`], [`ToValue`], [`StructValue`], [`Field`]
//! - **Errors**: [`FieldError`], [`Errors`], [`Param`], [`codes`]
//! - **Messages**: [`Translator`], [`SimpleTranslator`]
//! - **Compiled functions**: [`Validator`]

pub mod codes;
mod error;
mod translator;
mod validator;
mod value;

pub use error::{Errors, FieldError, Param, join_path};
pub use translator::{
    DEFAULT_MESSAGES, SimpleTranslator, Translator, default_english_translations, default_message,
    format_message,
};
pub use validator::Validator;
pub use value::{Field, Integer, StructValue, ToValue, Value};
