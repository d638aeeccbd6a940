//! Compiled validator handle

use std::fmt;
use std::sync::Arc;

use super::error::{Errors, FieldError};
use super::value::{ToValue, Value};

type ValidateFn = dyn Fn(&Value) -> Result<(), Errors> + Send + Sync;

/// A compiled validation function.
///
/// Cheap to clone (reference counted) and safe to call from any number of
/// threads: nothing captured at compile time is mutated afterwards.
///
/// # Examples
///
/// ```rust,ignore
/// use verity::Engine;
///
/// let engine = Engine::new();
/// let name = engine.from_tag("string;min=3;max=5")?;
/// assert!(name.validate("abc").is_ok());
/// assert_eq!(name.validate("ab").unwrap_err().first().unwrap().code, "string.min");
/// ```
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidateFn>,
}

impl Validator {
    /// Wraps a validation closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<(), Errors> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// A validator that accepts everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_| Ok(()))
    }

    /// A validator that reports `error` on every call.
    #[must_use]
    pub fn always_fail(error: FieldError) -> Self {
        let errors = Errors::from(error);
        Self::new(move |_| Err(errors.clone()))
    }

    /// Converts `value` and validates it.
    pub fn validate<T: ToValue + ?Sized>(&self, value: &T) -> Result<(), Errors> {
        (self.inner)(&value.to_value())
    }

    /// Validates an already converted value.
    pub fn validate_value(&self, value: &Value) -> Result<(), Errors> {
        (self.inner)(value)
    }

    /// Returns `true` if both handles point at the same compiled function.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}
