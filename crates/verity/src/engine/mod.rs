//! Validation engine
//!
//! An [`Engine`] bundles custom single-token rules, a plugin registry
//! snapshot, an optional translator, configuration defaults, and a
//! compilation cache. It is effectively immutable: every configuration
//! method returns a new engine that shares the rule table and translator but
//! starts with a fresh, empty cache.
//!
//! ```rust,ignore
//! use verity::{Engine, SimpleTranslator};
//!
//! let engine = Engine::new()
//!     .path_separator(":")
//!     .with_translator(SimpleTranslator::english());
//!
//! let name = engine.from_tag("string;min=3;max=10")?;
//! name.validate("Alice")?;
//! ```

mod cache;
mod config;
mod error;
mod walker;

use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::{BoolRules, CustomRules, IntRules, SliceRules, StringRules};
use crate::compiler::{Compiler, RuleCompileError};
use crate::foundation::{Errors, ToValue, Translator, Validator, Value};
use crate::rule::{Kind, Rule, canonical_key, parse_tag};

pub use cache::{CacheKey, CacheStats, CompileCache};
pub use config::{DEFAULT_PATH_SEPARATOR, EngineConfig, ValidateOpts};
pub use error::EngineError;

use walker::Walker;

/// Compiles, caches, and runs validators.
///
/// Cloning shares the cache; the `with_*` methods and
/// [`path_separator`](Self::path_separator) fork a new one.
#[derive(Clone)]
pub struct Engine {
    custom_rules: Arc<HashMap<String, Validator>>,
    compiler: Compiler,
    config: EngineConfig,
    cache: Arc<CompileCache>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with default configuration over a fresh plugin snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            custom_rules: Arc::new(HashMap::new()),
            compiler: Compiler::new(),
            config: config.normalized(),
            cache: Arc::new(CompileCache::new()),
        }
    }

    /// An engine with pre-registered single-token rules.
    #[must_use]
    pub fn with_custom_rules<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        let mut engine = Self::new();
        engine.custom_rules = Arc::new(rules.into_iter().map(|(k, v)| (k.into(), v)).collect());
        engine
    }

    // ------------------------------------------------------------------------
    // Forking configuration
    // ------------------------------------------------------------------------

    fn fork(&self, change: &'static str) -> Self {
        tracing::debug!(change, "forking engine with a fresh compile cache");
        Self {
            custom_rules: Arc::clone(&self.custom_rules),
            compiler: self.compiler.clone(),
            config: self.config.clone(),
            cache: Arc::new(CompileCache::new()),
        }
    }

    /// Routes messages through `translator`.
    #[must_use]
    pub fn with_translator(&self, translator: impl Translator + 'static) -> Self {
        self.with_shared_translator(Arc::new(translator))
    }

    /// Like [`with_translator`](Self::with_translator) for an already shared
    /// translator.
    #[must_use]
    pub fn with_shared_translator(&self, translator: Arc<dyn Translator>) -> Self {
        let mut engine = self.fork("translator");
        engine.compiler = Compiler::from_parts(Some(translator), self.compiler.plugins());
        engine
    }

    /// Adds a single-token rule that bypasses tag parsing.
    #[must_use]
    pub fn with_custom_rule(&self, name: impl Into<String>, validator: Validator) -> Self {
        let mut engine = self.fork("custom rule");
        Arc::make_mut(&mut engine.custom_rules).insert(name.into(), validator);
        engine
    }

    /// Adds a plugin rule kind visible to this engine only.
    #[must_use]
    pub fn with_plugin_rule<F>(&self, kind: impl Into<Kind>, compile: F) -> Self
    where
        F: Fn(&Compiler, &Rule) -> Result<Validator, RuleCompileError> + Send + Sync + 'static,
    {
        let mut engine = self.fork("plugin rule");
        engine.compiler.register_rule(kind, compile);
        engine
    }

    /// Sets the struct path separator; an empty separator is ignored.
    #[must_use]
    pub fn path_separator(&self, sep: &str) -> Self {
        if sep.is_empty() {
            return self.clone();
        }
        let mut engine = self.fork("path separator");
        sep.clone_into(&mut engine.config.path_separator);
        engine
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.config.path_separator
    }

    #[must_use]
    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.compiler.reporter().translator()
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The compiler this engine uses, including its plugin snapshot.
    #[must_use]
    pub const fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------------
    // Compilation
    // ------------------------------------------------------------------------

    /// Compiles rule tokens, the first being the base type.
    ///
    /// A single token naming a custom rule returns that rule directly.
    /// Otherwise the tokens are re-joined with `;`, parsed, and compiled
    /// through the tag cache.
    pub fn from_rules<S: AsRef<str>>(&self, rules: &[S]) -> Result<Validator, EngineError> {
        if rules.is_empty() {
            return Err(EngineError::EmptyRules);
        }
        if let [single] = rules
            && let Some(custom) = self.custom_rules.get(single.as_ref())
        {
            return Ok(custom.clone());
        }

        let tag = rules
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(";");

        self.cache.get_or_try_compile(CacheKey::Tag(tag.clone()), || {
            let parsed = parse_tag(&tag).map_err(|source| EngineError::Parse {
                tag: tag.clone(),
                source,
            })?;
            Ok(self.compiler.compile(&parsed))
        })
    }

    /// Compiles a whole tag; the empty tag compiles to a pass-through.
    pub fn from_tag(&self, tag: &str) -> Result<Validator, EngineError> {
        if tag.is_empty() {
            return Ok(Validator::noop());
        }
        let tokens: Vec<&str> = tag.split(';').collect();
        self.from_rules(&tokens)
    }

    /// Compiles a rule list through the AST cache.
    ///
    /// Lists carrying a function argument anywhere in the tree are compiled
    /// fresh on every call and never cached.
    #[must_use]
    pub fn compile_rules(&self, rules: &[Rule]) -> Validator {
        match canonical_key(rules) {
            Some(key) => self
                .cache
                .get_or_compile(CacheKey::Ast(key), || self.compiler.compile(rules)),
            None => {
                tracing::trace!(rules = rules.len(), "rule list holds a function, bypassing cache");
                self.compiler.compile(rules)
            }
        }
    }

    /// Compiles `tag` and validates `value` in one step.
    pub fn check_tag<T: ToValue + ?Sized>(&self, tag: &str, value: &T) -> Result<(), EngineError> {
        self.from_tag(tag)?
            .validate(value)
            .map_err(EngineError::Invalid)
    }

    /// Compiles `rules` and validates `value` in one step.
    pub fn check_rules<T: ToValue + ?Sized>(&self, rules: &[Rule], value: &T) -> Result<(), Errors> {
        self.compile_rules(rules).validate(value)
    }

    // ------------------------------------------------------------------------
    // Struct validation
    // ------------------------------------------------------------------------

    /// Validates a struct with the engine defaults.
    pub fn validate_struct<T: ToValue + ?Sized>(&self, value: &T) -> Result<(), EngineError> {
        self.validate_struct_with_opts(value, &ValidateOpts::default())
    }

    /// Validates a struct, honoring per-call overrides.
    ///
    /// `Box`, `Arc`, references and `Some` around the struct are transparent.
    /// Anything else that is not a struct is [`EngineError::NotAStruct`].
    pub fn validate_struct_with_opts<T: ToValue + ?Sized>(
        &self,
        value: &T,
        opts: &ValidateOpts,
    ) -> Result<(), EngineError> {
        let value = value.to_value();
        let Value::Struct(root) = &value else {
            return Err(EngineError::NotAStruct {
                found: value.type_name().to_owned(),
            });
        };

        let stop_on_first = opts.stop_on_first || self.config.stop_on_first;
        let sep = opts.separator(&self.config.path_separator);
        let errors = Walker::new(self, stop_on_first, sep).run(root);

        tracing::debug!(
            type_name = root.type_name(),
            errors = errors.len(),
            "struct validation finished"
        );
        errors.into_result().map_err(EngineError::Invalid)
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    /// A string rule builder.
    #[must_use]
    pub fn string(&self) -> StringRules<'_> {
        StringRules::new(self)
    }

    /// An integer rule builder accepting any native width.
    #[must_use]
    pub fn int(&self) -> IntRules<'_> {
        IntRules::new(self, false)
    }

    /// An integer rule builder accepting only `i64`.
    #[must_use]
    pub fn int64(&self) -> IntRules<'_> {
        IntRules::new(self, true)
    }

    #[must_use]
    pub fn slice(&self) -> SliceRules<'_> {
        SliceRules::new(self)
    }

    #[must_use]
    pub fn bool(&self) -> BoolRules<'_> {
        BoolRules::new(self)
    }

    /// A rule builder headed by the plugin kind `type_name`.
    #[must_use]
    pub fn custom_type(&self, type_name: impl Into<Kind>) -> CustomRules<'_> {
        CustomRules::new(self, type_name)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut custom: Vec<&str> = self.custom_rules.keys().map(String::as_str).collect();
        custom.sort_unstable();
        f.debug_struct("Engine")
            .field("custom_rules", &custom)
            .field("compiler", &self.compiler)
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}
