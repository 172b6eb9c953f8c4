//! Read and write reporting around any store.

use std::sync::Arc;

use serde_json::Value;

use super::{ConfigStore, LayeredStore};
use crate::nested::ConfigMap;
use crate::resolver::Resolver;
use crate::{ConfigLevel, StrataResult};

/// Sink for store activity.
///
/// Only `log_write` is required; reads and merges are ignored unless the
/// implementation opts in.
pub trait StoreLogger {
    /// Called after a successful write.
    fn log_write(&self, level: ConfigLevel, key: &str, value: &Value);

    /// Called after every lookup, hit or miss.
    fn log_read(&self, _key: &str, _value: Option<&Value>) {}

    /// Called after a merge.
    fn log_merge(&self, _level: ConfigLevel, _data: &ConfigMap) {}
}

/// Reports store activity through `tracing` at the `strata::store` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl StoreLogger for TracingLogger {
    fn log_write(&self, level: ConfigLevel, key: &str, value: &Value) {
        tracing::info!(target: "strata::store", %level, key, %value, "set");
    }

    fn log_read(&self, key: &str, value: Option<&Value>) {
        tracing::info!(
            target: "strata::store",
            key,
            found = value.is_some(),
            value = value.map(tracing::field::display),
            "get"
        );
    }

    fn log_merge(&self, level: ConfigLevel, data: &ConfigMap) {
        tracing::info!(target: "strata::store", %level, keys = data.len(), "merge");
    }
}

/// Wraps a store and reports every write, merge, and lookup.
#[derive(Debug, Default)]
pub struct LoggingStore<S = LayeredStore, L = TracingLogger> {
    inner: S,
    logger: L,
}

impl<S> LoggingStore<S> {
    /// Report activity on `inner` through [`TracingLogger`].
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            logger: TracingLogger,
        }
    }
}

impl<S, L> LoggingStore<S, L> {
    /// Report activity on `inner` through `logger`.
    pub const fn with_logger(inner: S, logger: L) -> Self {
        Self { inner, logger }
    }

    /// The wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The logger receiving activity.
    #[must_use]
    pub const fn logger(&self) -> &L {
        &self.logger
    }
}

impl<S: ConfigStore, L: StoreLogger> ConfigStore for LoggingStore<S, L> {
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>) {
        self.inner.register_resolver(level, resolver);
    }

    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        self.inner.set_level(level, key, value.clone())?;
        self.logger.log_write(level, key, &value);
        Ok(())
    }

    fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        self.logger.log_merge(level, &data);
        self.inner.merge(level, data);
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.inner.alias(from, to);
    }

    fn find(&self, key: &str) -> Option<Value> {
        let found = self.inner.find(key);
        self.logger.log_read(key, found.as_ref());
        found
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn debug(&self) -> String {
        self.inner.debug()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn delimiter(&self) -> char {
        self.inner.delimiter()
    }
}
