//! Thread-safe handle around any store.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;

use super::{ConfigStore, LayeredStore};
use crate::nested::ConfigMap;
use crate::resolver::Resolver;
use crate::{ConfigLevel, StrataResult};

/// Serialises every operation on the wrapped store behind one mutex.
///
/// Cloning the handle shares the underlying store. Reads take the same
/// lock as writes, so a `find` never observes a half-applied merge.
#[derive(Debug)]
pub struct SharedStore<S = LayeredStore> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Default> Default for SharedStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> SharedStore<S> {
    /// Wrap `store` for shared access.
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Hold the lock for a compound operation.
    ///
    /// The store is unusable from other handles until the guard drops.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock()
    }
}

// `&self` methods lock internally, so shared references are enough for
// writers that only hold a clone of the handle.
impl<S: ConfigStore> SharedStore<S> {
    /// Write through a shared reference.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped store's error.
    pub fn set_shared(&self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        self.inner.lock().set_level(level, key, value)
    }

    /// Merge through a shared reference.
    pub fn merge_shared(&self, level: ConfigLevel, data: ConfigMap) {
        self.inner.lock().merge(level, data);
    }
}

impl<S: ConfigStore> ConfigStore for SharedStore<S> {
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>) {
        self.inner.lock().register_resolver(level, resolver);
    }

    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        self.inner.lock().set_level(level, key, value)
    }

    fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        self.inner.lock().merge(level, data);
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.inner.lock().alias(from, to);
    }

    fn find(&self, key: &str) -> Option<Value> {
        self.inner.lock().find(key)
    }

    fn clear(&mut self) {
        self.inner.lock().clear();
    }

    fn debug(&self) -> String {
        self.inner.lock().debug()
    }

    fn size(&self) -> usize {
        self.inner.lock().size()
    }

    fn delimiter(&self) -> char {
        self.inner.lock().delimiter()
    }
}
