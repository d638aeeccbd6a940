//! # verity
//!
//! Declarative value validation driven by rule tags or rule lists.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verity::prelude::*;
//!
//! let engine = Engine::new();
//! let name = engine.from_tag("string;min=3;max=10")?;
//! assert!(name.validate("Alice").is_ok());
//!
//! let tags = engine.from_tag("slice;min=1;foreach=(string;min=2)")?;
//! let errors = tags.validate(&vec!["a", "bb"]).unwrap_err();
//! assert!(errors.has("[0]"));
//! ```
//!
//! ## Structs
//!
//! Derive [`Validate`] to describe a struct's fields and tags, then hand it
//! to [`Engine::validate_struct`]:
//!
//! ```rust,ignore
//! #[derive(Validate)]
//! pub struct User {
//!     #[validate = "string;min=3"]
//!     pub name: String,
//!     #[validate(tag = "int;min=18", rename = "Age")]
//!     pub age: u32,
//! }
//!
//! let err = Engine::new().validate_struct(&user).unwrap_err();
//! ```
//!
//! ## Layers
//!
//! - [`rule`]: the rule AST, the tag parser and canonical serialization
//! - [`compiler`]: rule lists to [`Validator`]s, plus the plugin registry
//! - [`engine`]: compilation cache, configuration and the struct walker
//! - [`builder`]: fluent rule-list builders
//! - [`plugins`]: the bundled `email`, `uuid` and `ulid` rules

extern crate self as verity;

pub mod builder;
pub mod compiler;
pub mod engine;
pub mod foundation;
pub mod plugins;
pub mod prelude;
pub mod rule;

pub use builder::{BoolRules, CustomRules, IntRules, SliceRules, StringRules};
pub use compiler::{Compiler, Reporter, RuleCompileError, register_rule};
pub use engine::{CacheKey, CacheStats, Engine, EngineConfig, EngineError, ValidateOpts};
pub use foundation::{
    Errors, Field, FieldError, Integer, Param, SimpleTranslator, StructValue, ToValue, Translator,
    Validator, Value, codes,
};
pub use rule::{Arg, Kind, Rule, TagError, canonical_key, has_func_args, parse_tag, serialize_rules};

#[cfg(feature = "derive")]
pub use verity_macros::Validate;
