//! The facade most applications use: a store plus file loaders.

use std::sync::Arc;

use camino::Utf8Path;
use serde::Serialize;
use serde_json::Value;

use crate::decode::{self, Record};
use crate::file::{FileLoaders, Loader};
use crate::nested::{self, ConfigMap};
use crate::resolver::{EnvResolver, Resolver};
use crate::store::{ConfigStore, LayeredStore, SharedStore};
use crate::{ConfigLevel, StrataResult, StrataResultExt};

/// A configuration store together with the loaders used to populate it.
///
/// ```
/// use serde_json::json;
/// use strata::Registry;
///
/// let mut registry = Registry::new();
/// registry.set_default("timeout", 10)?;
/// registry.set_override("timeout", 5)?;
/// assert_eq!(registry.find("timeout"), Some(json!(5)));
///
/// registry.clear();
/// assert_eq!(registry.find("timeout"), None);
/// # Ok::<(), std::sync::Arc<strata::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry<S = LayeredStore> {
    store: S,
    loaders: FileLoaders,
}

impl Registry {
    /// A registry over an unsynchronised [`LayeredStore`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(LayeredStore::new())
    }

    /// As [`Registry::new`], with an [`EnvResolver`] at
    /// [`ConfigLevel::ENVIRONMENT`].
    #[must_use]
    pub fn with_environment() -> Self {
        let mut registry = Self::new();
        registry.register_resolver(ConfigLevel::ENVIRONMENT, EnvResolver::new());
        registry
    }
}

impl Registry<SharedStore> {
    /// A registry whose store may be shared between threads through clones.
    #[must_use]
    pub fn shared() -> Self {
        Self::with_store(SharedStore::default())
    }

    /// As [`Registry::shared`], with an [`EnvResolver`] at
    /// [`ConfigLevel::ENVIRONMENT`].
    #[must_use]
    pub fn shared_with_environment() -> Self {
        let mut registry = Self::shared();
        registry.register_resolver(ConfigLevel::ENVIRONMENT, EnvResolver::new());
        registry
    }
}

impl<S: ConfigStore> Registry<S> {
    /// Wrap `store` with the default file loaders.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            loaders: FileLoaders::default(),
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store, for decorator-specific
    /// operations such as subscribing.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Install `resolver` at `level`.
    pub fn register_resolver(&mut self, level: ConfigLevel, resolver: impl Resolver + 'static) {
        self.store.register_resolver(level, Arc::new(resolver));
    }

    /// Write `value` at `key` within `level`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::PathConflict`] when `key` descends
    /// through a non-map value.
    pub fn set_level(
        &mut self,
        level: ConfigLevel,
        key: &str,
        value: impl Into<Value>,
    ) -> StrataResult<()> {
        self.store.set_level(level, key, value.into())
    }

    /// Write at [`ConfigLevel::DEFAULT`].
    ///
    /// # Errors
    ///
    /// See [`Registry::set_level`].
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> StrataResult<()> {
        self.set_level(ConfigLevel::DEFAULT, key, value)
    }

    /// Write at [`ConfigLevel::OVERRIDE`].
    ///
    /// # Errors
    ///
    /// See [`Registry::set_level`].
    pub fn set_override(&mut self, key: &str, value: impl Into<Value>) -> StrataResult<()> {
        self.set_level(ConfigLevel::OVERRIDE, key, value)
    }

    /// Value for `key`, or `None` when no level holds one.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<Value> {
        self.store.find(key)
    }

    /// Value for `key`, or `Value::Null` when no level holds one.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        self.find(key).unwrap_or_default()
    }

    /// Deep-merge `data` into `level`.
    pub fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        self.store.merge(level, data);
    }

    /// Merge any serialisable mapping into `level`. Non-string map keys are
    /// stringified.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Json`] when serialisation fails and
    /// [`crate::StrataError::NotAMap`] when `data` is not a mapping.
    pub fn merge_serialized<T: Serialize + ?Sized>(
        &mut self,
        level: ConfigLevel,
        data: &T,
    ) -> StrataResult<()> {
        let map = nested::from_serializable(data).into_strata()?;
        self.store.merge(level, map);
        Ok(())
    }

    /// Redirect lookups of `from` to `to`.
    pub fn alias(&mut self, from: &str, to: &str) {
        self.store.alias(from, to);
    }

    /// Discard all stored values, keeping resolvers and aliases.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Pretty JSON dump of every level.
    #[must_use]
    pub fn debug(&self) -> String {
        self.store.debug()
    }

    /// Number of levels holding values.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Register `loader` for `extension`, returning the loader it replaced.
    pub fn register_extension(&mut self, extension: &str, loader: Loader) -> Option<Loader> {
        self.loaders.register(extension, loader)
    }

    /// The extension table used by [`Registry::load_file`].
    #[must_use]
    pub const fn loaders(&self) -> &FileLoaders {
        &self.loaders
    }

    /// Parse `path` and merge it into [`ConfigLevel::FILE`].
    ///
    /// # Errors
    ///
    /// Returns I/O and parse errors verbatim, or
    /// [`crate::StrataError::NoLoader`] for an unregistered extension.
    pub fn load_file(&mut self, path: impl AsRef<Utf8Path>) -> StrataResult<()> {
        let data = self.loaders.load(path.as_ref())?;
        self.store.merge(ConfigLevel::FILE, data);
        Ok(())
    }

    /// Load every file under `dir` with a registered extension, in sorted
    /// path order. Subdirectories are walked only when `recurse` is set.
    ///
    /// Files loaded before a failure stay merged.
    ///
    /// # Errors
    ///
    /// Stops at the first walk, read, or parse failure.
    pub fn load_directory(&mut self, dir: impl AsRef<Utf8Path>, recurse: bool) -> StrataResult<()> {
        for path in self.loaders.discover(dir.as_ref(), recurse)? {
            self.load_file(&path)?;
        }
        Ok(())
    }

    /// Populate `target` from this registry's store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Coerce`] for the first field that
    /// cannot be coerced.
    pub fn decode<T: Record>(&self, target: &mut T) -> StrataResult<()> {
        decode::decode(&self.store, target)
    }
}
