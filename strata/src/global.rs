//! The process-wide registry.

use std::sync::LazyLock;

use crate::decode::Record;
use crate::store::SharedStore;
use crate::{Registry, StrataResult};

static GLOBAL: LazyLock<Registry<SharedStore>> =
    LazyLock::new(Registry::shared_with_environment);

/// Handle to the process-wide registry.
///
/// The registry is created on first use with an environment resolver at
/// [`crate::ConfigLevel::ENVIRONMENT`]. Every handle shares one store, so
/// values written through one are visible through all. It is never reset
/// implicitly; call [`Registry::clear`] to discard its values. Extensions
/// registered on a handle apply to that handle only.
#[must_use]
pub fn global() -> Registry<SharedStore> {
    GLOBAL.clone()
}

/// Populate `target` from the process-wide registry.
///
/// # Errors
///
/// Returns [`crate::StrataError::Coerce`] for the first field that cannot
/// be coerced.
pub fn decode_global<T: Record>(target: &mut T) -> StrataResult<()> {
    GLOBAL.decode(target)
}
