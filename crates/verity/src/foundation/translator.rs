//! Message localization
//!
//! The compiler resolves every failure message through an optional
//! [`Translator`]. When none is configured, or it returns an empty string
//! for a key, the built-in English table is used; codes missing from that
//! table get a synthesized `"<code>: <params>"` message. Messages are never
//! blank.

use std::collections::HashMap;

use super::codes;
use super::error::Param;

/// Localizes a message key with positional parameters.
///
/// Returning an empty string means "no translation available".
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &[Param]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[Param]) -> String + Send + Sync,
{
    fn translate(&self, key: &str, params: &[Param]) -> String {
        self(key, params)
    }
}

// ============================================================================
// DEFAULT MESSAGES
// ============================================================================

/// Built-in English messages for the core rule codes.
///
/// Templates use `%d`/`%s`/`%v` placeholders filled positionally.
pub const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (codes::UNKNOWN, "unknown rule kind: %s"),
    (codes::STRING_TYPE, "expected string"),
    (codes::STRING_LENGTH, "length must be %d"),
    (codes::STRING_MIN, "minimum length is %d"),
    (codes::STRING_MAX, "maximum length is %d"),
    (codes::STRING_MIN_RUNES, "minimum rune count is %d"),
    (codes::STRING_MAX_RUNES, "maximum rune count is %d"),
    (codes::STRING_ONE_OF, "must be one of: %s"),
    (codes::STRING_REGEX_INVALID_PATTERN, "invalid regex pattern: %s"),
    (codes::STRING_REGEX_INPUT_TOO_LONG, "input too long (max %d characters)"),
    (codes::STRING_REGEX_NO_MATCH, "does not match required pattern"),
    (codes::INT_TYPE, "expected integer"),
    (codes::INT64_TYPE, "expected int64"),
    (codes::INT_MIN, "minimum value is %d"),
    (codes::INT_MAX, "maximum value is %d"),
    (codes::SLICE_TYPE, "expected slice"),
    (codes::SLICE_LENGTH, "length must be %d"),
    (codes::SLICE_MIN, "minimum length is %d"),
    (codes::SLICE_MAX, "maximum length is %d"),
    (codes::BOOL_TYPE, "expected boolean"),
];

/// Returns the default English message for `code`.
///
/// Falls back to `"<code>: <params>"` (or just the code when there are no
/// params) for codes outside [`DEFAULT_MESSAGES`].
#[must_use]
pub fn default_message(code: &str, params: &[Param]) -> String {
    DEFAULT_MESSAGES
        .iter()
        .find(|(key, _)| *key == code)
        .map_or_else(|| synthesize(code, params), |(_, template)| format_message(template, params))
}

fn synthesize(code: &str, params: &[Param]) -> String {
    let code = if code.is_empty() { codes::UNKNOWN } else { code };
    if params.is_empty() {
        return code.to_owned();
    }
    let joined: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("{code}: {}", joined.join(", "))
}

/// Fills `%d`, `%s` and `%v` placeholders with `params` in order.
///
/// `%%` renders a literal percent sign. Placeholders beyond the supplied
/// params are left as written.
#[must_use]
pub fn format_message(template: &str, params: &[Param]) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut params = params.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('d' | 's' | 'v')) => {
                chars.next();
                match params.next() {
                    Some(param) => out.push_str(&param.to_string()),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

// ============================================================================
// SIMPLE TRANSLATOR
// ============================================================================

/// A map-backed [`Translator`].
///
/// # Examples
///
/// ```rust,ignore
/// use verity::SimpleTranslator;
///
/// let fr = SimpleTranslator::new([
///     ("string.min", "la longueur minimale est %d"),
/// ]);
/// let engine = verity::Engine::new().with_translator(fr);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleTranslator {
    messages: HashMap<String, String>,
}

impl SimpleTranslator {
    pub fn new<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A translator preloaded with [`default_english_translations`].
    #[must_use]
    pub fn english() -> Self {
        Self {
            messages: default_english_translations(),
        }
    }

    /// Adds or replaces one message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Returns the raw template for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for SimpleTranslator {
    fn translate(&self, key: &str, params: &[Param]) -> String {
        self.messages
            .get(key)
            .map(|template| format_message(template, params))
            .unwrap_or_default()
    }
}

/// Default English templates for the core codes and the bundled plugins.
#[must_use]
pub fn default_english_translations() -> HashMap<String, String> {
    DEFAULT_MESSAGES
        .iter()
        .chain(crate::plugins::DEFAULT_TRANSLATIONS.iter().flat_map(|table| table.iter()))
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
