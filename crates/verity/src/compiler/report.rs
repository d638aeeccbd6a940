//! Failure construction with localized messages

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Errors, FieldError, Param, Translator, default_message};

/// Builds [`Errors`] whose messages go through the configured translator.
///
/// Resolution order: the translator (when it returns a non-empty string),
/// then the default English table, then a synthesized `"<code>: <params>"`.
#[derive(Clone, Default)]
pub struct Reporter {
    translator: Option<Arc<dyn Translator>>,
}

impl Reporter {
    #[must_use]
    pub fn new(translator: Option<Arc<dyn Translator>>) -> Self {
        Self { translator }
    }

    #[must_use]
    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    fn translated(&self, code: &str, params: &[Param]) -> Option<String> {
        self.translator
            .as_ref()
            .map(|t| t.translate(code, params))
            .filter(|msg| !msg.is_empty())
    }

    /// The message for a built-in code.
    #[must_use]
    pub fn message(&self, code: &str, params: &[Param]) -> String {
        self.translated(code, params)
            .unwrap_or_else(|| default_message(code, params))
    }

    /// The message for `code`, falling back to `default` when untranslated.
    #[must_use]
    pub fn message_or(&self, code: &str, default: &str, params: &[Param]) -> String {
        match self.translated(code, params) {
            Some(msg) => msg,
            None if default.is_empty() => default_message(code, params),
            None => default.to_owned(),
        }
    }

    /// A single-error collection for a built-in code.
    #[must_use]
    pub fn fail(&self, code: &'static str, param: Option<Param>) -> Errors {
        let message = self.message(code, param.as_slice());
        Errors::from(build(FieldError::new(code, message), param))
    }

    /// A single-error collection for a plugin code with its own default message.
    #[must_use]
    pub fn fail_or(&self, code: &'static str, default: &str, param: Option<Param>) -> Errors {
        let message = self.message_or(code, default, param.as_slice());
        Errors::from(build(FieldError::new(code, message), param))
    }
}

fn build(error: FieldError, param: Option<Param>) -> FieldError {
    match param {
        Some(param) => error.with_param(param),
        None => error,
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{SimpleTranslator, codes};

    #[test]
    fn falls_back_to_defaults() {
        let r = Reporter::default();
        let errors = r.fail(codes::STRING_MIN, Some(Param::from(3)));
        let e = errors.first().unwrap();
        assert_eq!(e.code, codes::STRING_MIN);
        assert_eq!(e.param, Some(Param::Int(3)));
        assert_eq!(e.message, "minimum length is 3");
    }

    #[test]
    fn translator_wins_when_non_empty() {
        let fr = SimpleTranslator::new([(codes::STRING_MIN, "au moins %d caractères")]);
        let r = Reporter::new(Some(Arc::new(fr)));
        assert_eq!(r.message(codes::STRING_MIN, &[Param::from(3)]), "au moins 3 caractères");
        assert_eq!(r.message(codes::STRING_MAX, &[Param::from(5)]), "maximum length is 5");
    }

    #[test]
    fn plugin_defaults() {
        let r = Reporter::default();
        let errors = r.fail_or("string.email.invalid", "invalid email format", None);
        assert_eq!(errors.first().unwrap().message, "invalid email format");
        assert_eq!(r.message_or("x.y", "", &[]), "x.y");
    }
}
