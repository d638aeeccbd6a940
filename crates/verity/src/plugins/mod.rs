//! Bundled plugin rules
//!
//! `email`, `uuid` and `ulid` are ordinary plugin kinds: they go through the
//! same [`register_rule`] entry point as user rules and are only visible to
//! engines constructed after [`register_builtin_plugins`] has run.
//!
//! ```rust,ignore
//! verity::plugins::register_builtin_plugins();
//! let engine = verity::Engine::new();
//! engine.check_tag("string;email", &"ada@example.com")?;
//! ```

pub mod email;
pub mod ulid;
pub mod uuid;

use std::sync::Once;

use crate::compiler::{Compiler, register_rule};
use crate::foundation::{Param, Validator, Value, codes};

/// English templates for every bundled plugin, one table per plugin.
pub const DEFAULT_TRANSLATIONS: &[&[(&str, &str)]] = &[
    email::TRANSLATIONS,
    uuid::TRANSLATIONS,
    ulid::TRANSLATIONS,
];

static REGISTER: Once = Once::new();

/// Registers `email`, `uuid` and `ulid` in the global registry.
///
/// Safe to call any number of times; only the first call registers.
pub fn register_builtin_plugins() {
    REGISTER.call_once(|| {
        register_rule(email::KIND, |c, _| Ok(email::compile(c)));
        register_rule(uuid::KIND, |c, _| Ok(uuid::compile(c)));
        register_rule(ulid::KIND, |c, _| Ok(ulid::compile(c)));
    });
}

/// Wraps a string predicate as a validator reporting one plugin code.
///
/// `check` returns the param to attach on failure.
fn string_rule(
    c: &Compiler,
    code: &'static str,
    default: &'static str,
    check: fn(&str) -> Result<(), Option<Param>>,
) -> Validator {
    let reporter = c.reporter().clone();
    let type_err = reporter.fail(codes::STRING_TYPE, None);

    Validator::new(move |value| {
        let Value::Str(s) = value else {
            return Err(type_err.clone());
        };
        check(s).map_err(|param| reporter.fail_or(code, default, param))
    })
}
