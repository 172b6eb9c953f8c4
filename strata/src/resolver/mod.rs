//! Lookup strategies bound to individual configuration levels.
//!
//! Every level consults a [`Resolver`] during [`crate::ConfigStore::find`].
//! Levels without a registered resolver use [`DefaultResolver`], which walks
//! the level's own map. Custom resolvers may ignore that map and consult an
//! external source instead, as [`EnvResolver`] and [`FlagResolver`] do.

mod env;
mod flag;

pub use env::{EnvResolver, default_env_translator};
pub use flag::FlagResolver;

use serde_json::Value;

use crate::nested::{self, ConfigMap};

/// Maps a single byte of a key when translating it into an external
/// naming convention.
pub type KeyTranslator = fn(u8) -> u8;

/// Translator that leaves every byte unchanged.
#[must_use]
pub const fn identity_translator(byte: u8) -> u8 {
    byte
}

/// Looks up a value for a split key at one level.
///
/// Implementations must not mutate the store. They may read external
/// mutable state such as the process environment.
pub trait Resolver: Send + Sync {
    /// Return the value for `path`, or `None` when this level has no value.
    fn resolve(&self, path: &[&str], level: &ConfigMap) -> Option<Value>;
}

/// Adapter turning a closure into a [`Resolver`].
#[derive(Clone, Copy)]
pub struct FnResolver<F>(F);

/// Wrap `f` as a resolver.
///
/// ```
/// use serde_json::json;
/// use strata::{ConfigLevel, Registry, resolver};
///
/// let mut registry = Registry::new();
/// registry.register_resolver(
///     ConfigLevel::new(50),
///     resolver::from_fn(|path, _| (path == ["answer"]).then(|| json!(42))),
/// );
/// assert_eq!(registry.find("answer"), Some(json!(42)));
/// ```
pub const fn from_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&[&str], &ConfigMap) -> Option<Value> + Send + Sync,
{
    FnResolver(f)
}

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&[&str], &ConfigMap) -> Option<Value> + Send + Sync,
{
    fn resolve(&self, path: &[&str], level: &ConfigMap) -> Option<Value> {
        (self.0)(path, level)
    }
}

/// Walks the level's nested map segment by segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

impl Resolver for DefaultResolver {
    fn resolve(&self, path: &[&str], level: &ConfigMap) -> Option<Value> {
        nested::find(level, path).cloned()
    }
}
