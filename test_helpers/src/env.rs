//! Guarded mutation of environment variables.
//!
//! Each mutation takes a process-wide re-entrant lock and returns a guard
//! that restores the previous value on drop. Guards for the same key restore
//! in LIFO order. Hold an [`EnvScope`] when a test needs the lock for its
//! whole duration.
//!
//! ```
//! use strata_test_helpers::env;
//!
//! let _scope = env::scope(vec![
//!     env::set_var("APP_PORT", "8080"),
//!     env::remove_var("APP_HOST"),
//! ]);
//! assert_eq!(std::env::var("APP_PORT").as_deref(), Ok("8080"));
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: environment writes are serialised by `ENV_MUTEX`.
            Some(value) => unsafe { std::env::set_var(&self.key, value) },
            // SAFETY: as above.
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

fn mutate(key: String, apply: impl FnOnce(&str)) -> EnvVarGuard {
    let _lock = ENV_MUTEX.lock();
    let original = std::env::var_os(&key);
    apply(&key);
    EnvVarGuard { key, original }
}

/// Set `key` to `value` until the guard drops.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    // SAFETY: environment writes are serialised by `ENV_MUTEX`.
    mutate(key.into(), |k| unsafe { std::env::set_var(k, value.as_ref()) })
}

/// Unset `key` until the guard drops.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    // SAFETY: environment writes are serialised by `ENV_MUTEX`.
    mutate(key.into(), |k| unsafe { std::env::remove_var(k) })
}

/// Holds the environment lock and a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Take the environment lock for the lifetime of the returned guard.
pub fn lock() -> ReentrantMutexGuard<'static, ()> {
    ENV_MUTEX.lock()
}

/// Hold the environment lock while retaining `guards`.
pub fn scope(guards: Vec<EnvVarGuard>) -> EnvScope {
    EnvScope {
        guards,
        _lock: lock(),
    }
}
