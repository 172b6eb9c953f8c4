//! Priority-ordered storage of per-level configuration maps.
//!
//! [`LayeredStore`] is the base implementation. The remaining types wrap
//! any [`ConfigStore`] and add one concern each:
//!
//! - [`SharedStore`] serialises every operation behind a single lock so the
//!   store can be shared between threads;
//! - [`LoggingStore`] reports reads and writes to a [`StoreLogger`];
//! - [`SubscriptionStore`] publishes an [`Event`] for every write to the
//!   subscribers of that key or any of its ancestors.

mod layered;
mod logging;
mod shared;
mod subscription;

use std::sync::Arc;

use serde_json::Value;

pub use layered::LayeredStore;
pub use logging::{LoggingStore, StoreLogger, TracingLogger};
pub use shared::SharedStore;
pub use subscription::{Event, Subscription, SubscriptionStore};

use crate::nested::ConfigMap;
use crate::resolver::Resolver;
use crate::{ConfigLevel, StrataResult};

/// Operations shared by every store flavour.
///
/// Reads never fail: a key without a value at any level is `None`.
pub trait ConfigStore {
    /// Install `resolver` for `level`, making the level visible to
    /// [`ConfigStore::find`] even before it holds data.
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>);

    /// Write `value` at the dotted `key` within `level`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::PathConflict`] when the key descends
    /// through a value that is not a map.
    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()>;

    /// Deep-merge `data` into `level`.
    fn merge(&mut self, level: ConfigLevel, data: ConfigMap);

    /// Redirect lookups of `from` to `to`. Aliasing a key to itself is
    /// ignored.
    fn alias(&mut self, from: &str, to: &str);

    /// Resolve `key` against every level from highest to lowest priority.
    fn find(&self, key: &str) -> Option<Value>;

    /// Discard every level map. Resolvers and aliases are retained.
    fn clear(&mut self);

    /// Pretty-printed JSON of every level map keyed by priority.
    fn debug(&self) -> String;

    /// Number of levels that hold a map.
    fn size(&self) -> usize;

    /// Delimiter separating key segments.
    fn delimiter(&self) -> char;
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>) {
        (**self).register_resolver(level, resolver);
    }

    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        (**self).set_level(level, key, value)
    }

    fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        (**self).merge(level, data);
    }

    fn alias(&mut self, from: &str, to: &str) {
        (**self).alias(from, to);
    }

    fn find(&self, key: &str) -> Option<Value> {
        (**self).find(key)
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn debug(&self) -> String {
        (**self).debug()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn delimiter(&self) -> char {
        (**self).delimiter()
    }
}
