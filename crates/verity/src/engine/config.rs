//! Engine configuration
//!
//! [`EngineConfig`] holds the engine-wide defaults and can be loaded from
//! JSON. [`ValidateOpts`] overrides them for a single struct walk.

use serde::{Deserialize, Serialize};

/// Default path separator between struct field names.
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// Engine-wide defaults.
///
/// Missing JSON fields take their default values:
///
/// ```rust,ignore
/// let config = verity::EngineConfig::from_json(r#"{"stop_on_first": true}"#)?;
/// assert_eq!(config.path_separator, ".");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Joins nested field names in error paths.
    pub path_separator: String,

    /// Stop a struct walk at the first failure.
    pub stop_on_first: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR.to_owned(),
            stop_on_first: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator; an empty separator is ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path_separator(mut self, sep: impl Into<String>) -> Self {
        let sep = sep.into();
        if !sep.is_empty() {
            self.path_separator = sep;
        }
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub const fn with_stop_on_first(mut self, stop: bool) -> Self {
        self.stop_on_first = stop;
        self
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replaces an empty separator with the default.
    pub(crate) fn normalized(mut self) -> Self {
        if self.path_separator.is_empty() {
            DEFAULT_PATH_SEPARATOR.clone_into(&mut self.path_separator);
        }
        self
    }
}

/// Per-call overrides for a struct walk.
///
/// `stop_on_first` is OR-ed with the engine default; `path_sep` replaces the
/// engine separator when set and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOpts {
    pub stop_on_first: bool,
    pub path_sep: Option<String>,
}

impl ValidateOpts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub const fn stop_on_first(mut self, stop: bool) -> Self {
        self.stop_on_first = stop;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn path_sep(mut self, sep: impl Into<String>) -> Self {
        self.path_sep = Some(sep.into());
        self
    }

    /// The separator to use, given the engine default.
    pub(crate) fn separator<'a>(&'a self, default: &'a str) -> &'a str {
        match self.path_sep.as_deref() {
            Some(sep) if !sep.is_empty() => sep,
            _ => default,
        }
    }
}
