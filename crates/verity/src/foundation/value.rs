//! Dynamic value model
//!
//! Compiled validators never see host types directly. Every input is first
//! converted into a [`Value`], a closed sum type over the shapes the rule
//! vocabulary understands. Integer width is preserved so the exact `int64`
//! mode can tell a verbatim `i64` from a widened one.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// VALUE
// ============================================================================

/// A value presented to a compiled validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (`None`, JSON `null`).
    Null,
    /// Boolean.
    Bool(bool),
    /// Native integer, width preserved.
    Int(Integer),
    /// Floating point number. Never accepted by integer rules.
    Float(f64),
    /// Text.
    Str(String),
    /// Ordered, indexable sequence.
    Seq(Vec<Value>),
    /// String-keyed map in a stable order.
    Map(Vec<(String, Value)>),
    /// Record with named fields, as produced by `#[derive(Validate)]`.
    Struct(StructValue),
}

impl Value {
    /// Returns a short name for the value's shape, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(n) => n.type_name(),
            Self::Float(_) => "f64",
            Self::Str(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
            Self::Struct(s) => s.type_name(),
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// INTEGER
// ============================================================================

/// A native integer with its original width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integer {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
}

impl Integer {
    /// Normalizes to `i64`, or `None` if the value does not fit.
    #[must_use]
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Self::I8(n) => Some(i64::from(n)),
            Self::I16(n) => Some(i64::from(n)),
            Self::I32(n) => Some(i64::from(n)),
            Self::I64(n) => Some(n),
            Self::Isize(n) => i64::try_from(n).ok(),
            Self::U8(n) => Some(i64::from(n)),
            Self::U16(n) => Some(i64::from(n)),
            Self::U32(n) => Some(i64::from(n)),
            Self::U64(n) => i64::try_from(n).ok(),
            Self::Usize(n) => i64::try_from(n).ok(),
        }
    }

    /// Returns `true` only for a verbatim `i64`.
    #[must_use]
    pub const fn is_i64(self) -> bool {
        matches!(self, Self::I64(_))
    }

    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Isize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Usize(_) => "usize",
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(n) => n.fmt(f),
            Self::I16(n) => n.fmt(f),
            Self::I32(n) => n.fmt(f),
            Self::I64(n) => n.fmt(f),
            Self::Isize(n) => n.fmt(f),
            Self::U8(n) => n.fmt(f),
            Self::U16(n) => n.fmt(f),
            Self::U32(n) => n.fmt(f),
            Self::U64(n) => n.fmt(f),
            Self::Usize(n) => n.fmt(f),
        }
    }
}

// ============================================================================
// STRUCT DESCRIPTOR
// ============================================================================

/// A record value: a type name plus its fields in declaration order.
///
/// Usually generated by `#[derive(Validate)]`, but can be assembled by hand
/// for types the derive cannot reach:
///
/// ```rust,ignore
/// use verity::{Field, StructValue, Value, ToValue};
///
/// let user = StructValue::new("User", vec![
///     Field::new("Name", "Al".to_value()).with_tag("string;min=3"),
///     Field::new("Age", 10_i32.to_value()).with_tag("int;min=18"),
/// ]);
/// let value = Value::Struct(user);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    type_name: Cow<'static, str>,
    fields: Vec<Field>,
}

impl StructValue {
    pub fn new(type_name: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by its path name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One field of a [`StructValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Path segment used when reporting errors for this field.
    pub name: Cow<'static, str>,
    /// Rule tag, e.g. `"string;min=3"`. Untagged fields are only descended into.
    pub tag: Option<Cow<'static, str>>,
    /// Unexported fields are never visited by the struct walker.
    pub exported: bool,
    pub value: Value,
}

impl Field {
    /// Creates an exported, untagged field.
    pub fn new(name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        Self {
            name: name.into(),
            tag: None,
            exported: true,
            value,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Conversion of a host value into the [`Value`] model.
///
/// Implemented for strings, scalars, sequences, string-keyed maps, smart
/// pointers, `Option` and `serde_json::Value`. Structs get an implementation
/// from `#[derive(Validate)]`.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! impl_to_value_int {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(Integer::$variant(*self))
                }
            }
        )*
    };
}

impl_to_value_int! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: fmt::Display, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_value()))
                .collect(),
        )
    }
}

// Hash maps have no stable iteration order; sort by key so paths like
// `Field[key]` come out in the same order on every run.
impl<K: fmt::Display, V: ToValue, S: BuildHasher> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        let mut entries: Vec<(String, Value)> = self
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(entries)
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(Integer::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Int(Integer::U64(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Self::String(s) => Value::Str(s.clone()),
            Self::Array(items) => Value::Seq(items.iter().map(ToValue::to_value).collect()),
            Self::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_width_is_preserved() {
        assert_eq!(7_u8.to_value(), Value::Int(Integer::U8(7)));
        assert_eq!((-3_i64).to_value(), Value::Int(Integer::I64(-3)));
    }

    #[test]
    fn integer_normalization_rejects_overflow() {
        assert_eq!(Integer::U64(u64::MAX).to_i64(), None);
        assert_eq!(Integer::U64(42).to_i64(), Some(42));
        assert_eq!(Integer::I8(-1).to_i64(), Some(-1));
    }

    #[test]
    fn option_and_pointers_are_transparent() {
        let none: Option<String> = None;
        assert!(none.to_value().is_null());
        assert_eq!(Some(Box::new("x")).to_value(), Value::Str("x".into()));
        assert_eq!(Arc::new(5_i32).to_value(), Value::Int(Integer::I32(5)));
    }

    #[test]
    fn hash_map_entries_are_sorted() {
        let mut map = HashMap::new();
        map.insert("b", 2_i32);
        map.insert("a", 1_i32);
        let Value::Map(entries) = map.to_value() else {
            panic!("expected map");
        };
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn json_values_convert() {
        let value = json!({"tags": ["a", 1], "n": null}).to_value();
        let Value::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|(k, v)| k == "n" && v.is_null()));
    }

    #[test]
    fn type_names() {
        assert_eq!("x".to_value().type_name(), "string");
        assert_eq!(1_u16.to_value().type_name(), "u16");
        let s = StructValue::new("User", Vec::new());
        assert_eq!(Value::Struct(s).type_name(), "User");
    }
}
