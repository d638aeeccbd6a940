//! Stable error codes reported by the built-in rules.

/// Unknown rule kind, or a failure with no more specific code.
pub const UNKNOWN: &str = "unknown";

pub const STRING_TYPE: &str = "string.type";
pub const STRING_LENGTH: &str = "string.length";
pub const STRING_MIN: &str = "string.min";
pub const STRING_MAX: &str = "string.max";
pub const STRING_MIN_RUNES: &str = "string.minRunes";
pub const STRING_MAX_RUNES: &str = "string.maxRunes";
pub const STRING_ONE_OF: &str = "string.oneof";
pub const STRING_REGEX_INVALID_PATTERN: &str = "string.regex.invalidPattern";
pub const STRING_REGEX_INPUT_TOO_LONG: &str = "string.regex.inputTooLong";
pub const STRING_REGEX_NO_MATCH: &str = "string.regex.noMatch";

pub const INT_TYPE: &str = "int.type";
pub const INT64_TYPE: &str = "int64.type";
pub const INT_MIN: &str = "int.min";
pub const INT_MAX: &str = "int.max";

pub const SLICE_TYPE: &str = "slice.type";
pub const SLICE_LENGTH: &str = "slice.length";
pub const SLICE_MIN: &str = "slice.min";
pub const SLICE_MAX: &str = "slice.max";

pub const BOOL_TYPE: &str = "bool.type";
