//! Primary error enum for loading and decoding flows.

use std::path::PathBuf;

use thiserror::Error;

use super::CoerceError;

/// Errors that can occur while loading sources into a store or decoding
/// from it.
///
/// Store reads never fail; absence is reported as `None` by
/// [`crate::ConfigStore::find`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// Filesystem failure while reading a source, propagated verbatim.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON source failed to parse.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML source failed to parse.
    #[cfg(feature = "toml")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// YAML source failed to parse.
    #[cfg(feature = "yaml")]
    #[error(transparent)]
    Yaml(#[from] serde_saphyr::Error),

    /// JSON5 source failed to parse.
    #[cfg(feature = "json5")]
    #[error(transparent)]
    Json5(#[from] json5::Error),

    /// No loader is registered for the file's extension.
    #[error("no loader for extension {extension:?} (while loading '{}')", path.display())]
    NoLoader {
        /// Extension without its leading dot.
        extension: String,
        /// File that was being loaded.
        path: PathBuf,
    },

    /// A merge payload did not have a map at its root.
    #[error("expected a map of configuration values, found {found}")]
    NotAMap {
        /// Short description of the value that was supplied instead.
        found: String,
    },

    /// A write tried to descend through a non-map value.
    #[error("cannot write '{key}': segment '{segment}' already holds a non-map value")]
    PathConflict {
        /// Full key of the rejected write.
        key: String,
        /// Intermediate segment holding the scalar.
        segment: String,
    },

    /// A stored value could not be converted to its destination type.
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    /// `unsubscribe` was called for a key without an active subscription.
    #[error("no such subscription: {key:?}")]
    NoSuchSubscription {
        /// Subscription key that was not found.
        key: String,
    },

    /// Command-line arguments could not be parsed for the flag resolver.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),
}

impl StrataError {
    /// Construct a [`StrataError::PathConflict`].
    #[must_use]
    pub fn path_conflict(key: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::PathConflict {
            key: key.into(),
            segment: segment.into(),
        }
    }

    /// Returns the coercion failure when this error came from the decoder.
    #[must_use]
    pub const fn as_coerce(&self) -> Option<&CoerceError> {
        match self {
            Self::Coerce(err) => Some(err),
            _ => None,
        }
    }
}
