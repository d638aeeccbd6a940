//! Global plugin rule registry
//!
//! Plugin rule kinds are registered process-wide, normally once at startup.
//! Every [`Compiler`] (and therefore every `Engine`) takes a snapshot of this
//! table when it is constructed and never reads the global table again, so
//! registrations made afterwards are invisible to existing instances.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use thiserror::Error;

use super::Compiler;
use crate::foundation::Validator;
use crate::rule::{Kind, Rule};

/// Compiles one plugin rule into a validator.
pub type RuleCompilerFn =
    Arc<dyn Fn(&Compiler, &Rule) -> Result<Validator, RuleCompileError> + Send + Sync>;

/// Kind → plugin compiler.
pub type RuleTable = HashMap<Kind, RuleCompilerFn>;

/// A plugin compiler could not handle a rule.
///
/// The compiler logs it and falls through to the built-in kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleCompileError {
    #[error("rule {kind} is missing argument {arg}")]
    MissingArg { kind: String, arg: String },

    #[error("rule {kind} is invalid: {reason}")]
    Invalid { kind: String, reason: String },
}

static GLOBAL: LazyLock<RwLock<RuleTable>> = LazyLock::new(|| RwLock::new(HashMap::new()));

/// Registers (or replaces) the compiler for a plugin rule kind.
///
/// Only compilers and engines constructed afterwards see the registration.
///
/// # Examples
///
/// ```rust,ignore
/// use verity::{Errors, FieldError, Validator, Value};
///
/// verity::register_rule("nonblank", |c, _rule| {
///     let errors = c.reporter().fail_or("string.nonblank", "must not be blank", None);
///     Ok(Validator::new(move |v| match v {
///         Value::Str(s) if !s.trim().is_empty() => Ok(()),
///         _ => Err(errors.clone()),
///     }))
/// });
/// ```
pub fn register_rule<F>(kind: impl Into<Kind>, compile: F)
where
    F: Fn(&Compiler, &Rule) -> Result<Validator, RuleCompileError> + Send + Sync + 'static,
{
    let kind = kind.into();
    tracing::info!(kind = %kind, "registered plugin rule");
    GLOBAL.write().insert(kind, Arc::new(compile));
}

/// Returns `true` if `kind` is currently registered globally.
#[must_use]
pub fn is_registered(kind: &str) -> bool {
    GLOBAL.read().contains_key(kind)
}

/// The globally registered kinds, sorted.
#[must_use]
pub fn registered_kinds() -> Vec<Kind> {
    let mut kinds: Vec<Kind> = GLOBAL.read().keys().cloned().collect();
    kinds.sort();
    kinds
}

/// A point-in-time copy of the global table.
pub(crate) fn snapshot() -> Arc<RuleTable> {
    Arc::new(GLOBAL.read().clone())
}
