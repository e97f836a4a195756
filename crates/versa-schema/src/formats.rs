//! # Custom String Formats
//!
//! Three VERSA-specific `format` values, registered with the schema engine
//! alongside the standard ones (`date`, `uri`, `email`, ...):
//!
//! | Format | Predicate | Used for |
//! |--------|-----------|----------|
//! | `glob-pattern` | [`glob_pattern`] | context globs, file permission globs |
//! | `model-name` | [`model_name`] | `model` fields |
//! | `file-path` | [`file_path`] | rule/agent/prompt/tool/knowledge references |
//!
//! Every predicate is total: malformed input yields `false`, never a panic.
//!
//! ## Known looseness
//!
//! The `..` checks in [`glob_pattern`] and [`file_path`] are substring
//! tests, not path-segment tests. `a..b/c` is rejected although it has no
//! parent segment. Downstream tooling relies on this exact behavior, so
//! it is kept as is.

use serde_json::Value;

/// Format name for [`glob_pattern`].
pub const GLOB_PATTERN: &str = "glob-pattern";
/// Format name for [`model_name`].
pub const MODEL_NAME: &str = "model-name";
/// Format name for [`file_path`].
pub const FILE_PATH: &str = "file-path";

/// A custom format predicate.
pub type FormatPredicate = fn(&str) -> bool;

/// Custom formats in registration order.
pub const CUSTOM_FORMATS: [(&str, FormatPredicate); 3] = [
    (GLOB_PATTERN, glob_pattern),
    (MODEL_NAME, model_name),
    (FILE_PATH, file_path),
];

/// Accepts a non-empty glob with balanced `{}` and `[]` and no `..`.
///
/// Braces and brackets are counted independently; a closer without an
/// opener fails immediately. Wildcards (`*`, `**`, `?`) are not checked.
pub fn glob_pattern(value: &str) -> bool {
    if value.is_empty() || value.contains("..") {
        return false;
    }

    let mut braces: i64 = 0;
    let mut brackets: i64 = 0;
    for c in value.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
        if braces < 0 || brackets < 0 {
            return false;
        }
    }
    braces == 0 && brackets == 0
}

/// Accepts `[A-Za-z0-9][A-Za-z0-9._/-]*`, e.g. `claude-sonnet-4`,
/// `gpt-4-turbo`, `gemini-1.5-pro`, `meta-llama/Llama-3-8b`.
pub fn model_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-'))
}

/// Accepts a non-empty relative path using forward slashes only and
/// containing no `..`.
pub fn file_path(value: &str) -> bool {
    !value.is_empty() && !value.starts_with('/') && !value.contains("..") && !value.contains('\\')
}

/// Evaluate a custom format against an arbitrary JSON value.
///
/// Returns `false` for non-string values and for names that are not one
/// of the [`CUSTOM_FORMATS`].
pub fn matches_format(name: &str, value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    CUSTOM_FORMATS
        .iter()
        .find(|(format, _)| *format == name)
        .is_some_and(|(_, predicate)| predicate(text))
}
