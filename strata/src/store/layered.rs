//! The base store: one nested map per level.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::ConfigStore;
use crate::heap::LevelHeap;
use crate::nested::{self, ConfigMap, DEFAULT_DELIMITER};
use crate::resolver::{DefaultResolver, Resolver};
use crate::{ConfigLevel, StrataResult, StrataResultExt};

/// Stores configuration maps per level and resolves keys across them.
///
/// Levels materialise lazily on their first write or merge. The store has
/// no internal synchronisation; wrap it in [`super::SharedStore`] to share
/// it between threads.
pub struct LayeredStore {
    levels: HashMap<ConfigLevel, ConfigMap>,
    order: LevelHeap,
    resolvers: HashMap<ConfigLevel, Arc<dyn Resolver>>,
    aliases: HashMap<String, String>,
    delimiter: char,
}

impl Default for LayeredStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayeredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredStore")
            .field("levels", &self.levels)
            .field("order", &self.order)
            .field("resolvers", &self.resolvers.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .field("delimiter", &self.delimiter)
            .finish()
    }
}

impl LayeredStore {
    /// Create an empty store using `.` as the key delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Create an empty store splitting keys on `delimiter`.
    #[must_use]
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            levels: HashMap::new(),
            order: LevelHeap::new(),
            resolvers: HashMap::new(),
            aliases: HashMap::new(),
            delimiter,
        }
    }

    /// Levels visited by `find`, highest priority first.
    pub fn levels(&self) -> impl Iterator<Item = ConfigLevel> + '_ {
        self.order.iter()
    }

    fn level_map(&mut self, level: ConfigLevel) -> &mut ConfigMap {
        if !self.levels.contains_key(&level) {
            tracing::debug!(target: "strata::store", %level, "allocating level");
            self.order.insert_unique(level);
        }
        self.levels.entry(level).or_default()
    }

    fn canonical<'k>(&'k self, key: &'k str) -> &'k str {
        self.aliases.get(key).map_or(key, String::as_str)
    }
}

impl ConfigStore for LayeredStore {
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>) {
        self.resolvers.insert(level, resolver);
        self.order.insert_unique(level);
    }

    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        let delimiter = self.delimiter;
        let segments = nested::split(key, delimiter);
        let written = if self.levels.contains_key(&level) {
            nested::set(self.level_map(level), &segments, value, delimiter)
        } else {
            // A rejected write must not materialise the level.
            let mut fresh = ConfigMap::new();
            nested::set(&mut fresh, &segments, value, delimiter)
                .map(|()| nested::merge(self.level_map(level), fresh))
        };
        if let Err(err) = &written {
            tracing::warn!(target: "strata::store", %level, key, error = %err, "write rejected");
        }
        written.into_strata()
    }

    fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        nested::merge(self.level_map(level), data);
    }

    fn alias(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.aliases.insert(from.to_owned(), to.to_owned());
    }

    fn find(&self, key: &str) -> Option<Value> {
        let segments = nested::split(self.canonical(key), self.delimiter);
        let empty = ConfigMap::new();
        self.order.iter().find_map(|level| {
            let data = self.levels.get(&level).unwrap_or(&empty);
            match self.resolvers.get(&level) {
                Some(resolver) => resolver.resolve(&segments, data),
                None => DefaultResolver.resolve(&segments, data),
            }
        })
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.order = self.resolvers.keys().copied().collect();
    }

    fn debug(&self) -> String {
        let mut ordered: Vec<_> = self.levels.iter().collect();
        ordered.sort_by_key(|(level, _)| **level);
        let rendered: Map<String, Value> = ordered
            .into_iter()
            .map(|(level, data)| (level.to_string(), Value::Object(data.clone())))
            .collect();
        serde_json::to_string_pretty(&Value::Object(rendered)).unwrap_or_default()
    }

    fn size(&self) -> usize {
        self.levels.len()
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }
}
