//! Struct walker
//!
//! Applies each tagged field's compiled rules and recurses into untagged
//! fields holding structs, sequences of structs, or maps with struct values.
//! Paths are built as `Field`, `Field[i]` and `Field[key]`; bracketed
//! segments attach without a separator.

use std::ops::ControlFlow;

use super::Engine;
use crate::foundation::{Errors, FieldError, StructValue, Value, codes, join_path};

/// Transient per-call walk state.
pub(super) struct Walker<'e> {
    engine: &'e Engine,
    stop_on_first: bool,
    sep: &'e str,
    errors: Errors,
}

impl<'e> Walker<'e> {
    pub(super) fn new(engine: &'e Engine, stop_on_first: bool, sep: &'e str) -> Self {
        Self {
            engine,
            stop_on_first,
            sep,
            errors: Errors::new(),
        }
    }

    /// Walks `root` and returns everything collected.
    pub(super) fn run(mut self, root: &StructValue) -> Errors {
        let _ = self.walk_struct(root, "");
        self.errors
    }

    fn walk_struct(&mut self, value: &StructValue, path: &str) -> ControlFlow<()> {
        for field in value.fields().iter().filter(|f| f.exported) {
            let field_path = join_path(path, &field.name, self.sep);
            match field.tag.as_deref() {
                Some(tag) if !tag.is_empty() => self.check_field(tag, &field.value, &field_path)?,
                _ => self.descend(&field.value, &field_path)?,
            }
        }
        ControlFlow::Continue(())
    }

    fn check_field(&mut self, tag: &str, value: &Value, path: &str) -> ControlFlow<()> {
        let tokens: Vec<&str> = tag.split(';').collect();
        let validator = match self.engine.from_rules(&tokens) {
            Ok(validator) => validator,
            Err(err) => {
                let error = FieldError::new(codes::UNKNOWN, err.to_string()).with_path(path);
                return self.record(std::iter::once(error));
            }
        };

        match validator.validate_value(value) {
            Ok(()) => ControlFlow::Continue(()),
            Err(errors) => {
                let sep = self.sep;
                self.record(errors.into_iter().map(|e| e.under(path, sep)))
            }
        }
    }

    /// Recurses into struct-bearing shapes of an untagged field.
    fn descend(&mut self, value: &Value, path: &str) -> ControlFlow<()> {
        match value {
            Value::Struct(inner) => self.walk_struct(inner, path),
            Value::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if let Value::Struct(inner) = item {
                        self.walk_struct(inner, &format!("{path}[{i}]"))?;
                    }
                }
                ControlFlow::Continue(())
            }
            Value::Map(entries) => {
                for (key, item) in entries {
                    if let Value::Struct(inner) = item {
                        self.walk_struct(inner, &format!("{path}[{key}]"))?;
                    }
                }
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    /// Appends failures; in fail-fast mode keeps only the first and stops.
    fn record(&mut self, errors: impl IntoIterator<Item = FieldError>) -> ControlFlow<()> {
        if self.stop_on_first {
            return match errors.into_iter().next() {
                Some(first) => {
                    self.errors.push(first);
                    ControlFlow::Break(())
                }
                None => ControlFlow::Continue(()),
            };
        }
        self.errors.extend(errors);
        ControlFlow::Continue(())
    }
}
