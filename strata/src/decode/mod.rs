//! Populating typed records from a store.
//!
//! A destination type implements [`Record`] (normally through
//! `#[derive(Decode)]`) to list its fields and their lookup keys. Each field
//! type implements [`Decode`], which coerces the dynamic value found in the
//! store into the static type. Coercion is a closed set of impls selected at
//! compile time, covering strings, booleans, every integer and float width,
//! sequences, optional and boxed values, and string-keyed maps.
//!
//! ```
//! use strata::{ConfigLevel, Decode, Registry};
//!
//! #[derive(Debug, Default, Decode)]
//! struct Database {
//!     host: String,
//!     #[strata(rename = "port-number")]
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Decode)]
//! struct Settings {
//!     database: Database,
//!     #[strata(skip)]
//!     cache: Vec<String>,
//! }
//!
//! let mut registry = Registry::new();
//! registry.set_default("database.host", "localhost")?;
//! registry.set_level(ConfigLevel::ENVIRONMENT, "database.port-number", "5433")?;
//!
//! let mut settings = Settings::default();
//! registry.decode(&mut settings)?;
//! assert_eq!(settings.database.host, "localhost");
//! assert_eq!(settings.database.port, 5433);
//! # Ok::<(), std::sync::Arc<strata::StrataError>>(())
//! ```

mod collections;
mod scalar;

use std::borrow::Cow;

use serde_json::Value;

use crate::nested;
use crate::store::ConfigStore;
use crate::{CoerceError, StrataResult, StrataResultExt};

/// A type that can be produced from a dynamic configuration value.
pub trait Decode: Sized {
    /// Name used in coercion errors, such as `string` or `[i64]`.
    fn type_name() -> Cow<'static, str>;

    /// Build a value from `value`.
    ///
    /// Records ignore `value` and read their fields from the decoder's
    /// current namespace instead.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] naming `value` and [`Decode::type_name`]
    /// when the value's kind is incompatible with `Self`.
    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError>;

    /// Overwrite `self` with the value found for its key.
    ///
    /// The default builds a fresh value first, so a failure leaves `self`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates the coercion failure.
    fn assign(&mut self, value: &Value, decoder: &mut Decoder<'_>) -> Result<(), CoerceError> {
        *self = Self::from_value(value, decoder)?;
        Ok(())
    }

    /// Called when no level holds a value for the key. Scalars keep their
    /// current value; records descend so that nested fields can still be
    /// found under deeper keys.
    ///
    /// # Errors
    ///
    /// Propagates failures from nested fields.
    fn assign_missing(&mut self, decoder: &mut Decoder<'_>) -> Result<(), CoerceError> {
        let _ = decoder;
        Ok(())
    }

    /// Build a value for an absent slot, such as an `Option` that is still
    /// `None`, when no level holds a value for the key.
    ///
    /// Scalars return `None`. Records return a default instance filled from
    /// deeper keys, but only when at least one of those keys was found.
    ///
    /// # Errors
    ///
    /// Propagates failures from nested fields.
    fn from_missing(decoder: &mut Decoder<'_>) -> Result<Option<Self>, CoerceError> {
        let _ = decoder;
        Ok(None)
    }
}

/// A destination with named fields.
pub trait Record {
    /// Decode every field relative to the decoder's current namespace.
    ///
    /// # Errors
    ///
    /// Stops at the first field that fails to coerce. Fields processed
    /// before it keep their new values.
    fn decode_fields(&mut self, decoder: &mut Decoder<'_>) -> Result<(), CoerceError>;
}

/// Walks a store on behalf of a [`Record`], tracking the key namespace.
pub struct Decoder<'s> {
    store: &'s dyn ConfigStore,
    namespace: Vec<String>,
    delimiter: char,
    found: usize,
}

impl<'s> Decoder<'s> {
    /// Start decoding at the root of `store`.
    #[must_use]
    pub fn new(store: &'s dyn ConfigStore) -> Self {
        Self {
            store,
            namespace: Vec::new(),
            delimiter: store.delimiter(),
            found: 0,
        }
    }

    /// The key prefix applied to fields decoded at this point.
    #[must_use]
    pub fn namespace(&self) -> String {
        nested::join(&self.namespace, self.delimiter)
    }

    /// Decode the field stored under `key`, relative to the current
    /// namespace, into `slot`.
    ///
    /// # Errors
    ///
    /// Propagates the field's coercion failure.
    pub fn field<T: Decode>(&mut self, key: &str, slot: &mut T) -> Result<(), CoerceError> {
        self.scoped(key, |decoder| {
            let path = decoder.namespace();
            match decoder.store.find(&path) {
                Some(value) => {
                    decoder.found += 1;
                    slot.assign(&value, decoder)
                }
                None => slot.assign_missing(decoder),
            }
        })
    }

    /// Number of keys resolved by this decoder so far.
    #[must_use]
    pub const fn found(&self) -> usize {
        self.found
    }

    /// Run `f` with `key` appended to the namespace.
    pub fn scoped<R>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.namespace.push(key.to_owned());
        let out = f(self);
        self.namespace.pop();
        out
    }
}

/// Populate `target` from `store`.
///
/// # Errors
///
/// Returns [`crate::StrataError::Coerce`] for the first field that cannot
/// be coerced.
pub fn decode<S, T>(store: &S, target: &mut T) -> StrataResult<()>
where
    S: ConfigStore,
    T: Record,
{
    tracing::debug!(target: "strata::decode", record = std::any::type_name::<T>(), "decoding");
    let mut decoder = Decoder::new(store);
    target.decode_fields(&mut decoder).into_strata()
}

/// Shared body of `Decode::from_value` for records.
///
/// # Errors
///
/// Propagates the first field failure.
pub fn record_from_namespace<T>(decoder: &mut Decoder<'_>) -> Result<T, CoerceError>
where
    T: Record + Default,
{
    let mut out = T::default();
    out.decode_fields(decoder)?;
    Ok(out)
}

/// Shared body of `Decode::from_missing` for records: decode a default
/// instance and keep it only if some field below the namespace was found.
///
/// # Errors
///
/// Propagates the first field failure.
pub fn record_if_found<T>(decoder: &mut Decoder<'_>) -> Result<Option<T>, CoerceError>
where
    T: Record + Default,
{
    let before = decoder.found();
    let out = record_from_namespace::<T>(decoder)?;
    Ok((decoder.found() > before).then_some(out))
}
