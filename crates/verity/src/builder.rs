//! Fluent rule builders
//!
//! Builders assemble the same rule lists the tag parser produces and compile
//! them through [`Engine::compile_rules`], so equal chains share one cached
//! validator.
//!
//! ```rust,ignore
//! let engine = verity::Engine::new();
//! let name = engine.string().min_length(3).max_length(10).build();
//! let tags = engine.slice().min_length(1).for_each_string(engine.string().min_length(2)).build();
//! ```

use crate::engine::Engine;
use crate::foundation::Validator;
use crate::rule::{Kind, Rule};

// ============================================================================
// STRING
// ============================================================================

/// Builds string rule lists; starts with the `string` type check.
#[derive(Debug, Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct StringRules<'e> {
    engine: &'e Engine,
    rules: Vec<Rule>,
}

impl<'e> StringRules<'e> {
    pub(crate) fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            rules: vec![Rule::new(Kind::STRING)],
        }
    }

    fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Exact byte length.
    pub fn length(self, n: i64) -> Self {
        self.push(Rule::length(n))
    }

    pub fn min_length(self, n: i64) -> Self {
        self.push(Rule::min_length(n))
    }

    pub fn max_length(self, n: i64) -> Self {
        self.push(Rule::max_length(n))
    }

    /// Minimum number of chars.
    pub fn min_runes(self, n: i64) -> Self {
        self.push(Rule::min_runes(n))
    }

    /// Maximum number of chars.
    pub fn max_runes(self, n: i64) -> Self {
        self.push(Rule::max_runes(n))
    }

    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Rule::one_of(values))
    }

    /// Full-match regex; anchors are added when missing.
    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.push(Rule::regex(pattern))
    }

    /// A plugin rule such as `"email"`.
    pub fn rule(self, kind: impl Into<Kind>) -> Self {
        self.push(Rule::new(kind))
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    #[must_use]
    pub fn build(&self) -> Validator {
        self.engine.compile_rules(&self.rules)
    }
}

// ============================================================================
// INT
// ============================================================================

/// Builds integer rule lists; starts with `int` or, in exact mode, `int64`.
#[derive(Debug, Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct IntRules<'e> {
    engine: &'e Engine,
    rules: Vec<Rule>,
}

impl<'e> IntRules<'e> {
    pub(crate) fn new(engine: &'e Engine, exact: bool) -> Self {
        let base = if exact { Kind::INT64 } else { Kind::INT };
        Self {
            engine,
            rules: vec![Rule::new(base)],
        }
    }

    pub fn min(mut self, n: i64) -> Self {
        self.rules.push(Rule::min_int(n));
        self
    }

    pub fn max(mut self, n: i64) -> Self {
        self.rules.push(Rule::max_int(n));
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    #[must_use]
    pub fn build(&self) -> Validator {
        self.engine.compile_rules(&self.rules)
    }
}

// ============================================================================
// SLICE
// ============================================================================

/// Builds sequence rule lists; starts with the `slice` type check.
#[derive(Debug, Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct SliceRules<'e> {
    engine: &'e Engine,
    rules: Vec<Rule>,
}

impl<'e> SliceRules<'e> {
    pub(crate) fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            rules: vec![Rule::new(Kind::SLICE)],
        }
    }

    fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn length(self, n: i64) -> Self {
        self.push(Rule::slice_length(n))
    }

    pub fn min_length(self, n: i64) -> Self {
        self.push(Rule::min_slice_length(n))
    }

    pub fn max_length(self, n: i64) -> Self {
        self.push(Rule::max_slice_length(n))
    }

    /// Validates every element with an already compiled validator.
    ///
    /// The resulting list carries a function argument and is never cached.
    pub fn for_each(self, element: Validator) -> Self {
        self.push(Rule::for_each_fn(element))
    }

    /// Validates every element with a nested rule list; empty is a no-op.
    pub fn for_each_rules(self, rules: Vec<Rule>) -> Self {
        if rules.is_empty() {
            return self;
        }
        self.push(Rule::for_each(rules))
    }

    /// Validates every element with a string builder's rules.
    pub fn for_each_string(self, element: StringRules<'_>) -> Self {
        self.for_each_rules(element.into_rules())
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    #[must_use]
    pub fn build(&self) -> Validator {
        self.engine.compile_rules(&self.rules)
    }
}

// ============================================================================
// BOOL
// ============================================================================

/// Builds the boolean type check.
#[derive(Debug, Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct BoolRules<'e> {
    engine: &'e Engine,
    rules: Vec<Rule>,
}

impl<'e> BoolRules<'e> {
    pub(crate) fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            rules: vec![Rule::new(Kind::BOOL)],
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    #[must_use]
    pub fn build(&self) -> Validator {
        self.engine.compile_rules(&self.rules)
    }
}

// ============================================================================
// CUSTOM TYPE
// ============================================================================

/// Builds a rule list headed by a plugin kind rather than a base type.
///
/// ```rust,ignore
/// let engine = Engine::new().with_plugin_rule("sku", compile_sku);
/// let sku = engine.custom_type("sku").rule(Rule::max_length(12)).build();
/// ```
///
/// The kind must be registered (globally before the engine was built, or
/// through [`Engine::with_plugin_rule`]); otherwise the validator reports
/// `unknown` when run.
#[derive(Debug, Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct CustomRules<'e> {
    engine: &'e Engine,
    rules: Vec<Rule>,
}

impl<'e> CustomRules<'e> {
    pub(crate) fn new(engine: &'e Engine, type_name: impl Into<Kind>) -> Self {
        Self {
            engine,
            rules: vec![Rule::new(type_name)],
        }
    }

    /// Appends another rule, plugin or built-in.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &Kind {
        &self.rules[0].kind
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    #[must_use]
    pub fn build(&self) -> Validator {
        self.engine.compile_rules(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{FieldError, Value};
    use crate::rule::parse_tag;
    use pretty_assertions::assert_eq;

    #[test]
    fn builders_match_parsed_tags() {
        let engine = Engine::new();
        assert_eq!(
            engine.string().min_length(3).max_length(10).into_rules(),
            parse_tag("string;min=3;max=10").unwrap()
        );
        assert_eq!(
            engine.int64().min(1).max(9).into_rules(),
            parse_tag("int64;min=1;max=9").unwrap()
        );
        assert_eq!(
            engine
                .slice()
                .min_length(1)
                .for_each_string(engine.string().min_length(2))
                .into_rules(),
            parse_tag("slice;min=1;foreach=(string;min=2)").unwrap()
        );
        assert_eq!(engine.bool().into_rules(), parse_tag("bool").unwrap());
    }

    #[test]
    fn equal_chains_share_a_cache_entry() {
        let engine = Engine::new();
        let a = engine.string().min_length(3).build();
        let b = engine.string().min_length(3).build();
        assert!(Validator::ptr_eq(&a, &b));
    }

    #[test]
    fn empty_for_each_rules_is_ignored() {
        let engine = Engine::new();
        assert_eq!(engine.slice().for_each_rules(Vec::new()).rules().len(), 1);
    }

    #[test]
    fn custom_type_heads_the_list() {
        let engine = Engine::new().with_plugin_rule("even", |_, _| {
            Ok(Validator::new(|value| match value {
                Value::Int(n) if n.to_i64().is_some_and(|n| n % 2 == 0) => Ok(()),
                _ => Err(FieldError::new("even.invalid", "must be even").into()),
            }))
        });
        let rules = engine.custom_type("even");
        assert_eq!(rules.type_name().as_str(), "even");
        assert_eq!(rules.rules(), [Rule::new("even")]);

        let v = rules.build();
        assert!(v.validate(&4).is_ok());
        assert_eq!(v.validate(&3).unwrap_err().first().unwrap().code, "even.invalid");
        assert!(Validator::ptr_eq(&v, &engine.custom_type("even").build()));
    }

    #[test]
    fn function_elements_are_not_cached() {
        let engine = Engine::new();
        let element = engine.string().min_length(1).build();
        let rules = engine.slice().for_each(element);
        assert!(!Validator::ptr_eq(&rules.build(), &rules.build()));
        assert!(rules.build().validate(&vec!["a", ""]).is_err());
    }
}
