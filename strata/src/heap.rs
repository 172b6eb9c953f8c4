//! Max-priority ordering of the levels that currently hold data or
//! resolvers.

use crate::ConfigLevel;

/// Levels kept in descending priority order.
///
/// Reads visit levels far more often than new levels appear, so the order
/// is maintained on insertion and iteration needs no sorting. Duplicates
/// are permitted; [`LevelHeap::insert_unique`] is the guarded entry point
/// used by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelHeap {
    levels: Vec<ConfigLevel>,
}

impl LevelHeap {
    /// Create an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Insert `level`, keeping max-first order. Equal levels queue behind
    /// existing entries.
    pub fn push(&mut self, level: ConfigLevel) {
        let at = self.levels.partition_point(|existing| *existing >= level);
        self.levels.insert(at, level);
    }

    /// Insert `level` unless it is already present. Returns `true` when the
    /// level was added.
    pub fn insert_unique(&mut self, level: ConfigLevel) -> bool {
        if self.contains(level) {
            return false;
        }
        self.push(level);
        true
    }

    /// Remove and return the highest-priority level.
    pub fn pop(&mut self) -> Option<ConfigLevel> {
        if self.levels.is_empty() {
            None
        } else {
            Some(self.levels.remove(0))
        }
    }

    /// Highest-priority level without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<ConfigLevel> {
        self.levels.first().copied()
    }

    /// Whether `level` is present.
    #[must_use]
    pub fn contains(&self, level: ConfigLevel) -> bool {
        self.levels.contains(&level)
    }

    /// Levels from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = ConfigLevel> + '_ {
        self.levels.iter().copied()
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the heap holds no levels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Drop every level.
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

impl FromIterator<ConfigLevel> for LevelHeap {
    fn from_iter<I: IntoIterator<Item = ConfigLevel>>(iter: I) -> Self {
        let mut heap = Self::new();
        for level in iter {
            heap.push(level);
        }
        heap
    }
}
