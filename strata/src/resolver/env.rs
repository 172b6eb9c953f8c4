//! Resolve configuration from process environment variables.

use serde_json::Value;

use super::{KeyTranslator, Resolver};
use crate::nested::ConfigMap;

/// Separator placed between key segments when forming a variable name.
pub const DEFAULT_ENV_SEPARATOR: &str = "_";

/// Default translation into environment naming: ASCII uppercase with `-`
/// mapped to `_`.
///
/// ```
/// use strata::resolver::default_env_translator;
///
/// assert_eq!(default_env_translator(b'a'), b'A');
/// assert_eq!(default_env_translator(b'-'), b'_');
/// ```
#[must_use]
pub const fn default_env_translator(byte: u8) -> u8 {
    match byte {
        b'-' => b'_',
        other => other.to_ascii_uppercase(),
    }
}

/// Looks up `log.level` as the environment variable `LOG_LEVEL`.
///
/// The level's own map is ignored. A prefix, when set, is prepended as an
/// extra leading segment (`APP` + `log.level` → `APP_LOG_LEVEL`).
#[derive(Clone, Debug)]
pub struct EnvResolver {
    prefix: Option<String>,
    separator: String,
    translator: KeyTranslator,
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self {
            prefix: None,
            separator: DEFAULT_ENV_SEPARATOR.to_owned(),
            translator: default_env_translator,
        }
    }
}

impl EnvResolver {
    /// Resolver without a prefix using the default separator and translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` as the first segment of every variable name.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self::default().with_prefix(prefix)
    }

    /// Set the prefix segment.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// Set the separator placed between segments.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the byte translator applied to the joined name.
    #[must_use]
    pub fn with_translator(mut self, translator: KeyTranslator) -> Self {
        self.translator = translator;
        self
    }

    /// Environment variable name consulted for `path`.
    #[must_use]
    pub fn variable_name(&self, path: &[&str]) -> String {
        let segments = self.prefix.as_deref().into_iter().chain(path.iter().copied());
        let joined = segments.collect::<Vec<_>>().join(&self.separator);
        let translated: Vec<u8> = joined.bytes().map(self.translator).collect();
        String::from_utf8(translated).unwrap_or_else(|err| {
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        })
    }
}

impl Resolver for EnvResolver {
    fn resolve(&self, path: &[&str], _level: &ConfigMap) -> Option<Value> {
        std::env::var(self.variable_name(path)).ok().map(Value::String)
    }
}
