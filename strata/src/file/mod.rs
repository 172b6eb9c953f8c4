//! Loading configuration files into a store.
//!
//! A [`FileLoaders`] table maps file extensions to parser functions. JSON is
//! always available; TOML, YAML, and JSON5 follow the crate features of the
//! same names.

pub mod parser;
mod walk;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::nested::{self, ConfigMap};
use crate::{StrataError, StrataResult, StrataResultExt};

/// Parses the full text of a file into a dynamic value.
pub type Loader = fn(&str) -> StrataResult<Value>;

/// Extension-to-loader table. Extensions are matched case-insensitively
/// and stored without their leading dot.
#[derive(Clone)]
pub struct FileLoaders {
    loaders: HashMap<String, Loader>,
}

impl fmt::Debug for FileLoaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLoaders")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl Default for FileLoaders {
    fn default() -> Self {
        let mut loaders = Self::empty();
        loaders.register("json", parser::json);
        #[cfg(feature = "toml")]
        loaders.register("toml", parser::toml);
        #[cfg(feature = "yaml")]
        {
            loaders.register("yaml", parser::yaml);
            loaders.register("yml", parser::yaml);
        }
        #[cfg(feature = "json5")]
        loaders.register("json5", parser::json5);
        loaders
    }
}

impl FileLoaders {
    /// A table without any loaders.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register `loader` for `extension`, returning the loader it replaced.
    pub fn register(&mut self, extension: &str, loader: Loader) -> Option<Loader> {
        self.loaders.insert(normalise(extension), loader)
    }

    /// Loader registered for `extension`.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<Loader> {
        self.loaders.get(&normalise(extension)).copied()
    }

    /// Registered extensions in sorted order.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut out: Vec<_> = self.loaders.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Whether `path` has an extension with a registered loader.
    #[must_use]
    pub fn supports(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|extension| self.get(extension).is_some())
    }

    /// Read and parse `path` into a map.
    ///
    /// The file is read before its extension is checked. An empty document
    /// yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns the I/O error verbatim, [`StrataError::NoLoader`] for an
    /// unregistered extension, the parser's error verbatim, or
    /// [`StrataError::NotAMap`] when the document root is not a mapping.
    pub fn load(&self, path: &Utf8Path) -> StrataResult<ConfigMap> {
        let contents = walk::read(path).into_strata()?;
        let extension = path.extension().unwrap_or_default();
        let loader = self.get(extension).ok_or_else(|| {
            Arc::new(StrataError::NoLoader {
                extension: extension.to_owned(),
                path: path.as_std_path().to_path_buf(),
            })
        })?;
        let data = match loader(&contents)? {
            Value::Null => ConfigMap::new(),
            other => nested::into_map(other).into_strata()?,
        };
        tracing::debug!(target: "strata::file", %path, keys = data.len(), "loaded configuration file");
        Ok(data)
    }

    /// Files under `dir` with a registered extension, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while walking the directory.
    pub fn discover(&self, dir: &Utf8Path, recurse: bool) -> StrataResult<Vec<Utf8PathBuf>> {
        walk::files(dir, recurse, &|path| self.supports(path)).into_strata()
    }
}

fn normalise(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests;
