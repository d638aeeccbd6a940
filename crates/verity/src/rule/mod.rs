//! Rule AST
//!
//! A [`Rule`] is one validation directive: an open-ended [`Kind`] plus
//! loosely typed [`Arg`]s. Rule lists come from the tag parser
//! ([`parse_tag`]) or from the fluent builders, and both compile to the
//! same validators.

mod error;
mod parser;
mod serialize;

use std::borrow::{Borrow, Cow};
use std::fmt;

use indexmap::IndexMap;

use crate::foundation::Validator;

pub use error::TagError;
pub use parser::parse_tag;
pub use serialize::{canonical_key, has_func_args, serialize_rules};

// ============================================================================
// KIND
// ============================================================================

/// Built-in kind names, usable as match patterns.
pub mod kinds {
    pub const STRING: &str = "string";
    pub const LENGTH: &str = "length";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const MIN_RUNES: &str = "minRunes";
    pub const MAX_RUNES: &str = "maxRunes";
    pub const REGEX: &str = "regex";
    pub const ONE_OF: &str = "oneOf";
    pub const INT: &str = "int";
    pub const INT64: &str = "int64";
    pub const MIN_INT: &str = "minInt";
    pub const MAX_INT: &str = "maxInt";
    pub const SLICE: &str = "slice";
    pub const SLICE_LENGTH: &str = "sliceLength";
    pub const MIN_SLICE_LENGTH: &str = "minSliceLength";
    pub const MAX_SLICE_LENGTH: &str = "maxSliceLength";
    pub const FOR_EACH: &str = "forEach";
    pub const BOOL: &str = "bool";
}

/// Argument keys used by the built-in kinds.
pub mod args {
    pub const N: &str = "n";
    pub const PATTERN: &str = "pattern";
    pub const VALUES: &str = "values";
    pub const RULES: &str = "rules";
    pub const VALIDATOR: &str = "validator";
}

/// The name of a rule kind, built-in or plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kind(Cow<'static, str>);

impl Kind {
    pub const STRING: Self = Self::from_static(kinds::STRING);
    pub const LENGTH: Self = Self::from_static(kinds::LENGTH);
    pub const MIN_LENGTH: Self = Self::from_static(kinds::MIN_LENGTH);
    pub const MAX_LENGTH: Self = Self::from_static(kinds::MAX_LENGTH);
    pub const MIN_RUNES: Self = Self::from_static(kinds::MIN_RUNES);
    pub const MAX_RUNES: Self = Self::from_static(kinds::MAX_RUNES);
    pub const REGEX: Self = Self::from_static(kinds::REGEX);
    pub const ONE_OF: Self = Self::from_static(kinds::ONE_OF);
    pub const INT: Self = Self::from_static(kinds::INT);
    pub const INT64: Self = Self::from_static(kinds::INT64);
    pub const MIN_INT: Self = Self::from_static(kinds::MIN_INT);
    pub const MAX_INT: Self = Self::from_static(kinds::MAX_INT);
    pub const SLICE: Self = Self::from_static(kinds::SLICE);
    pub const SLICE_LENGTH: Self = Self::from_static(kinds::SLICE_LENGTH);
    pub const MIN_SLICE_LENGTH: Self = Self::from_static(kinds::MIN_SLICE_LENGTH);
    pub const MAX_SLICE_LENGTH: Self = Self::from_static(kinds::MAX_SLICE_LENGTH);
    pub const FOR_EACH: Self = Self::from_static(kinds::FOR_EACH);
    pub const BOOL: Self = Self::from_static(kinds::BOOL);

    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Kind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Kind {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

// ============================================================================
// ARG
// ============================================================================

/// A loosely typed rule argument.
///
/// `Func` is the one variant that cannot be serialized into a cache key;
/// any rule tree containing it is recompiled on every request.
#[derive(Clone)]
pub enum Arg {
    Int(i64),
    Str(String),
    StrSet(Vec<String>),
    Rules(Vec<Rule>),
    Func(Validator),
}

impl Arg {
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str_set(&self) -> Option<&[String]> {
        match self {
            Self::StrSet(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rules(&self) -> Option<&[Rule]> {
        match self {
            Self::Rules(rules) => Some(rules),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_func(&self) -> Option<&Validator> {
        match self {
            Self::Func(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if this argument is, or nests, a function.
    #[must_use]
    pub fn contains_func(&self) -> bool {
        match self {
            Self::Func(_) => true,
            Self::Rules(rules) => rules.iter().any(Rule::contains_func),
            Self::Int(_) | Self::Str(_) | Self::StrSet(_) => false,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::StrSet(values) => f.debug_tuple("StrSet").field(values).finish(),
            Self::Rules(rules) => f.debug_tuple("Rules").field(rules).finish(),
            Self::Func(_) => f.write_str("Func(<fn>)"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::StrSet(a), Self::StrSet(b)) => a == b,
            (Self::Rules(a), Self::Rules(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => Validator::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for Arg {
    fn from(values: Vec<String>) -> Self {
        Self::StrSet(values)
    }
}

impl From<Vec<Rule>> for Arg {
    fn from(rules: Vec<Rule>) -> Self {
        Self::Rules(rules)
    }
}

impl From<Validator> for Arg {
    fn from(v: Validator) -> Self {
        Self::Func(v)
    }
}

// ============================================================================
// RULE
// ============================================================================

/// One validation directive.
///
/// # Examples
///
/// ```rust,ignore
/// use verity::{Kind, Rule};
///
/// let rules = vec![Rule::new(Kind::STRING), Rule::min_length(3)];
/// let same = verity::parse_tag("string;min=3")?;
/// assert_eq!(rules, same);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: Kind,
    pub args: IndexMap<String, Arg>,
    /// Single nested rule kept for `forEach`; `args["rules"]` takes precedence.
    pub elem: Option<Box<Rule>>,
}

impl Rule {
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            kind: kind.into(),
            args: IndexMap::new(),
            elem: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_elem(mut self, elem: Self) -> Self {
        self.elem = Some(Box::new(elem));
        self
    }

    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&Arg> {
        self.args.get(key)
    }

    #[must_use]
    pub fn int_arg(&self, key: &str) -> Option<i64> {
        self.arg(key).and_then(Arg::as_int)
    }

    #[must_use]
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arg(key).and_then(Arg::as_str)
    }

    #[must_use]
    pub fn str_set_arg(&self, key: &str) -> Option<&[String]> {
        self.arg(key).and_then(Arg::as_str_set)
    }

    #[must_use]
    pub fn rules_arg(&self, key: &str) -> Option<&[Rule]> {
        self.arg(key).and_then(Arg::as_rules)
    }

    #[must_use]
    pub fn func_arg(&self, key: &str) -> Option<&Validator> {
        self.arg(key).and_then(Arg::as_func)
    }

    /// Returns `true` if any argument in this tree, `elem` included, is a function.
    #[must_use]
    pub fn contains_func(&self) -> bool {
        self.args.values().any(Arg::contains_func)
            || self.elem.as_deref().is_some_and(Self::contains_func)
    }

    // ------------------------------------------------------------------------
    // Shorthand constructors for the built-in kinds
    // ------------------------------------------------------------------------

    fn with_n(kind: Kind, n: i64) -> Self {
        Self::new(kind).with_arg(args::N, n)
    }

    #[must_use]
    pub fn length(n: i64) -> Self {
        Self::with_n(Kind::LENGTH, n)
    }

    #[must_use]
    pub fn min_length(n: i64) -> Self {
        Self::with_n(Kind::MIN_LENGTH, n)
    }

    #[must_use]
    pub fn max_length(n: i64) -> Self {
        Self::with_n(Kind::MAX_LENGTH, n)
    }

    #[must_use]
    pub fn min_runes(n: i64) -> Self {
        Self::with_n(Kind::MIN_RUNES, n)
    }

    #[must_use]
    pub fn max_runes(n: i64) -> Self {
        Self::with_n(Kind::MAX_RUNES, n)
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(Kind::REGEX).with_arg(args::PATTERN, pattern.into())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        Self::new(Kind::ONE_OF).with_arg(args::VALUES, values)
    }

    #[must_use]
    pub fn min_int(n: i64) -> Self {
        Self::with_n(Kind::MIN_INT, n)
    }

    #[must_use]
    pub fn max_int(n: i64) -> Self {
        Self::with_n(Kind::MAX_INT, n)
    }

    #[must_use]
    pub fn slice_length(n: i64) -> Self {
        Self::with_n(Kind::SLICE_LENGTH, n)
    }

    #[must_use]
    pub fn min_slice_length(n: i64) -> Self {
        Self::with_n(Kind::MIN_SLICE_LENGTH, n)
    }

    #[must_use]
    pub fn max_slice_length(n: i64) -> Self {
        Self::with_n(Kind::MAX_SLICE_LENGTH, n)
    }

    /// `forEach` over a nested rule list; `elem` mirrors the first rule.
    #[must_use]
    pub fn for_each(rules: Vec<Self>) -> Self {
        let first = rules.first().cloned();
        let rule = Self::new(Kind::FOR_EACH).with_arg(args::RULES, rules);
        match first {
            Some(elem) => rule.with_elem(elem),
            None => rule,
        }
    }

    /// `forEach` over an opaque validator. Never cached.
    #[must_use]
    pub fn for_each_fn(validator: Validator) -> Self {
        Self::new(Kind::FOR_EACH).with_arg(args::VALIDATOR, validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_compare_by_name() {
        assert_eq!(Kind::new("minLength".to_owned()), Kind::MIN_LENGTH);
        assert_eq!(Kind::from("email").as_str(), "email");
        assert_eq!(Kind::FOR_EACH.to_string(), "forEach");
    }

    #[test]
    fn func_detection_reaches_nested_rules_and_elem() {
        let plain = Rule::for_each(vec![Rule::new(Kind::STRING), Rule::min_length(1)]);
        assert!(!plain.contains_func());

        let nested = Rule::for_each(vec![Rule::for_each_fn(Validator::noop())]);
        assert!(nested.contains_func());

        let via_elem = Rule::new(Kind::FOR_EACH).with_elem(Rule::for_each_fn(Validator::noop()));
        assert!(via_elem.contains_func());
    }

    #[test]
    fn func_args_compare_by_identity() {
        let v = Validator::noop();
        assert_eq!(Arg::Func(v.clone()), Arg::Func(v));
        assert_ne!(Arg::Func(Validator::noop()), Arg::Func(Validator::noop()));
        assert_eq!(format!("{:?}", Arg::Func(Validator::noop())), "Func(<fn>)");
    }

    #[test]
    fn typed_accessors() {
        let rule = Rule::one_of(["a", "b"]).with_arg(args::N, 2);
        assert_eq!(rule.str_set_arg(args::VALUES), Some(&["a".to_owned(), "b".to_owned()][..]));
        assert_eq!(rule.int_arg(args::N), Some(2));
        assert_eq!(rule.str_arg(args::N), None);
    }
}
