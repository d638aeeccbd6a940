//! Structured validation failures
//!
//! A failed validation produces an [`Errors`] collection of [`FieldError`]
//! records. Each record is addressable by path (`User.Tags[2]`), carries a
//! stable machine code for programmatic branching, the rule parameter that
//! was violated, and a human-readable message.
//!
//! Codes use `Cow<'static, str>` so the built-in codes never allocate.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// PARAM
// ============================================================================

/// The raw rule parameter attached to a failure (threshold, pattern, list).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Int(i64),
    Str(String),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Param {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Param {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for Param {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

// ============================================================================
// FIELD ERROR
// ============================================================================

/// One path-addressed validation failure.
///
/// # Examples
///
/// ```rust,ignore
/// use verity::FieldError;
///
/// let error = FieldError::new("string.min", "minimum length is 3")
///     .with_path("User.Name")
///     .with_param(3);
/// assert_eq!(error.to_string(), "User.Name [string.min] param=3: minimum length is 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dot/bracket path of the failing value, empty for the value itself.
    pub path: String,

    /// Stable machine-readable code, e.g. `"string.min"`.
    pub code: Cow<'static, str>,

    /// The rule parameter that was violated, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Param>,

    /// Localized human-readable message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl FieldError {
    /// Creates an error at the empty path.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            code: code.into(),
            param: None,
            message: message.into(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, param: impl Into<Param>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Re-roots this error under `base`, joining with `sep`.
    #[must_use = "builder methods must be chained or built"]
    pub fn under(mut self, base: &str, sep: &str) -> Self {
        self.path = join_path(base, &self.path, sep);
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.path, self.code)?;
        if let Some(param) = &self.param {
            write!(f, " param={param}")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Joins a child path onto `base`.
///
/// Bracketed children (`[0]`, `[key]`) attach directly, an empty child keeps
/// `base`, and an empty `base` yields the child unchanged.
#[must_use]
pub fn join_path(base: &str, child: &str, sep: &str) -> String {
    if base.is_empty() {
        return child.to_owned();
    }
    if child.is_empty() {
        return base.to_owned();
    }
    if child.starts_with('[') {
        return format!("{base}{child}");
    }
    let sep = if sep.is_empty() { "." } else { sep };
    format!("{base}{sep}{child}")
}

// ============================================================================
// ERRORS
// ============================================================================

/// An ordered collection of [`FieldError`]s, in discovery order.
///
/// Displays as a single line with entries joined by `"; "` and serializes
/// to a JSON array (`[]` when empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Errors {
    errors: Vec<FieldError>,
}

impl Errors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    /// Returns `true` if any error sits exactly at `path`.
    #[must_use]
    pub fn has(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// Returns the errors whose path starts with `prefix`.
    #[must_use]
    pub fn filter(&self, prefix: &str) -> Self {
        self.errors
            .iter()
            .filter(|e| e.path.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Groups errors by path, keeping first-seen path order.
    #[must_use]
    pub fn as_map(&self) -> IndexMap<String, Vec<FieldError>> {
        let mut map: IndexMap<String, Vec<FieldError>> = IndexMap::new();
        for error in &self.errors {
            map.entry(error.path.clone())
                .or_default()
                .push(error.clone());
        }
        map
    }

    /// Stable sort by path, then code.
    pub fn sort(&mut self) {
        self.errors
            .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.code.cmp(&b.code)));
    }

    /// Flattens several collections into one, preserving order.
    pub fn join<I>(collections: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        collections.into_iter().flatten().collect()
    }

    /// Prefixes every path with the bracketed element index `[i]`.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        self.errors
            .into_iter()
            .map(|mut e| {
                e.path = format!("[{index}]{}", e.path);
                e
            })
            .collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for Errors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<FieldError>> for Errors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl FromIterator<FieldError> for Errors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<FieldError> for Errors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for Errors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

// ============================================================================
// TESTS
// ============================================================================
