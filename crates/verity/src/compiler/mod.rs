//! Rule compiler
//!
//! [`Compiler::compile`] turns a rule list into one [`Validator`] in two
//! phases: each rule is resolved once into a closure holding its
//! precomputed state (compiled regex, threshold, nested validator), then the
//! closures run in order and the first failure wins.
//!
//! Resolution order per rule:
//!
//! 1. the plugin table (a snapshot of the global registry plus per-instance
//!    registrations); a plugin error falls through to step 2
//! 2. the built-in kinds
//! 3. otherwise an always-failing validator with code `unknown`

mod boolean;
mod collection;
mod numeric;
mod pattern;
mod registry;
mod report;
mod string;

use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::{Errors, FieldError, Param, Translator, Validator, codes};
use crate::rule::{Rule, args, kinds};

pub use pattern::{MAX_REGEX_INPUT, anchor_pattern};
pub use registry::{
    RuleCompileError, RuleCompilerFn, RuleTable, is_registered, register_rule, registered_kinds,
};
pub use report::Reporter;

// ============================================================================
// BOUNDS
// ============================================================================

/// How a measured quantity relates to the rule threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Exact,
    Min,
    Max,
}

impl Bound {
    pub(crate) const fn holds(self, actual: i64, n: i64) -> bool {
        match self {
            Self::Exact => actual == n,
            Self::Min => actual >= n,
            Self::Max => actual <= n,
        }
    }
}

/// Lengths never realistically exceed `i64::MAX`; saturate if they do.
pub(crate) fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles rule lists into validators.
///
/// # Examples
///
/// ```rust,ignore
/// use verity::{Compiler, Rule, Kind};
///
/// let compiler = Compiler::new();
/// let v = compiler.compile(&[Rule::new(Kind::STRING), Rule::min_length(3)]);
/// assert!(v.validate("abc").is_ok());
/// ```
#[derive(Clone)]
pub struct Compiler {
    reporter: Reporter,
    plugins: Arc<RuleTable>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// A compiler without a translator over a fresh registry snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::with_translator(None)
    }

    #[must_use]
    pub fn with_translator(translator: Option<Arc<dyn Translator>>) -> Self {
        Self::from_parts(translator, registry::snapshot())
    }

    pub(crate) fn from_parts(
        translator: Option<Arc<dyn Translator>>,
        plugins: Arc<RuleTable>,
    ) -> Self {
        Self {
            reporter: Reporter::new(translator),
            plugins,
        }
    }

    /// Registers a plugin kind on this compiler only.
    pub fn register_rule<F>(&mut self, kind: impl Into<crate::rule::Kind>, compile: F)
    where
        F: Fn(&Self, &Rule) -> Result<Validator, RuleCompileError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.plugins).insert(kind.into(), Arc::new(compile));
    }

    pub(crate) fn plugins(&self) -> Arc<RuleTable> {
        Arc::clone(&self.plugins)
    }

    #[must_use]
    pub fn has_rule(&self, kind: &str) -> bool {
        self.plugins.contains_key(kind)
    }

    #[must_use]
    pub const fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Resolves a message through the translator, then the default table.
    #[must_use]
    pub fn translate(&self, code: &str, params: &[Param]) -> String {
        self.reporter.message(code, params)
    }

    /// Resolves a message through the translator, falling back to `default`.
    #[must_use]
    pub fn translate_or(&self, code: &str, default: &str, params: &[Param]) -> String {
        self.reporter.message_or(code, default, params)
    }

    /// Compiles `rules` into one short-circuiting validator.
    ///
    /// Never fails: unknown kinds and invalid regex patterns become
    /// validators that fail when invoked.
    #[must_use]
    pub fn compile(&self, rules: &[Rule]) -> Validator {
        match rules {
            [] => Validator::noop(),
            [single] => self.compile_rule(single),
            _ => {
                let chain: SmallVec<[Validator; 4]> =
                    rules.iter().map(|rule| self.compile_rule(rule)).collect();
                Validator::new(move |value| {
                    chain.iter().try_for_each(|v| v.validate_value(value))
                })
            }
        }
    }

    fn compile_rule(&self, rule: &Rule) -> Validator {
        if let Some(plugin) = self.plugins.get(rule.kind.as_str()) {
            match plugin(self, rule) {
                Ok(validator) => return validator,
                Err(err) => {
                    tracing::warn!(
                        kind = %rule.kind,
                        error = %err,
                        "plugin rule failed to compile, falling back to built-ins"
                    );
                }
            }
        }
        self.compile_builtin(rule)
    }

    fn compile_builtin(&self, rule: &Rule) -> Validator {
        let r = &self.reporter;
        let n = rule.int_arg(args::N).unwrap_or(0);

        match rule.kind.as_str() {
            kinds::STRING => string::is_string(r),
            kinds::LENGTH => string::byte_length(r, Bound::Exact, n),
            kinds::MIN_LENGTH => string::byte_length(r, Bound::Min, n),
            kinds::MAX_LENGTH => string::byte_length(r, Bound::Max, n),
            kinds::MIN_RUNES => string::rune_count(r, Bound::Min, n),
            kinds::MAX_RUNES => string::rune_count(r, Bound::Max, n),
            kinds::ONE_OF => string::one_of(r, rule.str_set_arg(args::VALUES).unwrap_or_default()),
            kinds::REGEX => pattern::regex(r, rule.str_arg(args::PATTERN).unwrap_or_default()),
            kinds::INT => numeric::is_int(r),
            kinds::INT64 => numeric::is_int64(r),
            kinds::MIN_INT => numeric::int_bound(r, Bound::Min, n),
            kinds::MAX_INT => numeric::int_bound(r, Bound::Max, n),
            kinds::SLICE => collection::is_slice(r),
            kinds::SLICE_LENGTH => collection::slice_length(r, Bound::Exact, n),
            kinds::MIN_SLICE_LENGTH => collection::slice_length(r, Bound::Min, n),
            kinds::MAX_SLICE_LENGTH => collection::slice_length(r, Bound::Max, n),
            kinds::FOR_EACH => collection::for_each(r, self.element_validator(rule)),
            kinds::BOOL => boolean::is_bool(r),
            other => self.unknown(other),
        }
    }

    /// `rules`, then `elem`, then an opaque `validator`, then pass-through.
    fn element_validator(&self, rule: &Rule) -> Validator {
        if let Some(rules) = rule.rules_arg(args::RULES) {
            return self.compile(rules);
        }
        if let Some(elem) = &rule.elem {
            return self.compile(std::slice::from_ref(elem.as_ref()));
        }
        rule.func_arg(args::VALIDATOR)
            .cloned()
            .unwrap_or_else(Validator::noop)
    }

    fn unknown(&self, kind: &str) -> Validator {
        let param = Param::from(kind);
        let message = self.reporter.message(codes::UNKNOWN, std::slice::from_ref(&param));
        Validator::always_fail(FieldError::new(codes::UNKNOWN, message).with_param(param))
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut plugins: Vec<&str> = self.plugins.keys().map(crate::rule::Kind::as_str).collect();
        plugins.sort_unstable();
        f.debug_struct("Compiler")
            .field("reporter", &self.reporter)
            .field("plugins", &plugins)
            .finish()
    }
}

/// Shorthand used by the built-in rule bodies.
pub(crate) fn fail_with(errors: &Errors) -> Result<(), Errors> {
    Err(errors.clone())
}

// ============================================================================
// TESTS
// ============================================================================
