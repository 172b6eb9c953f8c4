//! Built-in format loaders.

use serde_json::Value;

use crate::{StrataResult, StrataResultExt};

/// Parse JSON text.
///
/// # Errors
///
/// Returns [`crate::StrataError::Json`] on malformed input.
pub fn json(contents: &str) -> StrataResult<Value> {
    serde_json::from_str(contents).into_strata()
}

/// Parse TOML text.
///
/// # Errors
///
/// Returns [`crate::StrataError::Toml`] on malformed input.
#[cfg(feature = "toml")]
pub fn toml(contents: &str) -> StrataResult<Value> {
    toml::from_str(contents).into_strata()
}

/// Parse YAML text with YAML 1.2 booleans, so `yes` and `on` stay strings.
///
/// # Errors
///
/// Returns [`crate::StrataError::Yaml`] on malformed input.
#[cfg(feature = "yaml")]
pub fn yaml(contents: &str) -> StrataResult<Value> {
    serde_saphyr::from_str_with_options(
        contents,
        serde_saphyr::Options {
            strict_booleans: true,
            ..serde_saphyr::Options::default()
        },
    )
    .into_strata()
}

/// Parse JSON5 text.
///
/// # Errors
///
/// Returns [`crate::StrataError::Json5`] on malformed input.
#[cfg(feature = "json5")]
pub fn json5(contents: &str) -> StrataResult<Value> {
    json5::from_str(contents).into_strata()
}
