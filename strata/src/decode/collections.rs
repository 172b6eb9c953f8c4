//! Coercion into sequences, optional values, boxes, and string-keyed maps.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;

use super::{Decode, Decoder};
use crate::CoerceError;

/// Sequences accept `null` as empty. Any failing element aborts the whole
/// sequence and is reported as the inner cause.
impl<T: Decode> Decode for Vec<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("[{}]", T::type_name()))
    }

    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| T::from_value(item, decoder))
                .collect::<Result<_, _>>()
                .map_err(|inner| CoerceError::wrapping(value.clone(), Self::type_name(), inner)),
            other => Err(CoerceError::new(other.clone(), Self::type_name())),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, decoder).map(Some),
        }
    }

    fn assign_missing(&mut self, decoder: &mut Decoder<'_>) -> Result<(), CoerceError> {
        match self {
            Some(inner) => inner.assign_missing(decoder),
            None => {
                *self = T::from_missing(decoder)?;
                Ok(())
            }
        }
    }

    fn from_missing(decoder: &mut Decoder<'_>) -> Result<Option<Self>, CoerceError> {
        Ok(T::from_missing(decoder)?.map(Some))
    }
}

impl<T: Decode> Decode for Box<T> {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        T::from_value(value, decoder).map(Self::new)
    }

    fn assign(&mut self, value: &Value, decoder: &mut Decoder<'_>) -> Result<(), CoerceError> {
        (**self).assign(value, decoder)
    }

    fn assign_missing(&mut self, decoder: &mut Decoder<'_>) -> Result<(), CoerceError> {
        (**self).assign_missing(decoder)
    }

    fn from_missing(decoder: &mut Decoder<'_>) -> Result<Option<Self>, CoerceError> {
        Ok(T::from_missing(decoder)?.map(Self::new))
    }
}

fn map_type_name<T: Decode>() -> Cow<'static, str> {
    Cow::Owned(format!("{{string: {}}}", T::type_name()))
}

/// Decode each entry with the entry's key appended to the namespace, so
/// record values read their fields from `field.<key>.*`.
fn decode_entries<T, M>(value: &Value, decoder: &mut Decoder<'_>) -> Result<M, CoerceError>
where
    T: Decode,
    M: Default + Extend<(String, T)>,
{
    match value {
        Value::Null => Ok(M::default()),
        Value::Object(entries) => {
            let mut out = M::default();
            for (key, item) in entries {
                let decoded = decoder
                    .scoped(key, |scoped| T::from_value(item, scoped))
                    .map_err(|inner| {
                        CoerceError::wrapping(value.clone(), map_type_name::<T>(), inner)
                    })?;
                out.extend([(key.clone(), decoded)]);
            }
            Ok(out)
        }
        other => Err(CoerceError::new(other.clone(), map_type_name::<T>())),
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn type_name() -> Cow<'static, str> {
        map_type_name::<T>()
    }

    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        decode_entries(value, decoder)
    }
}

impl<T, H> Decode for HashMap<String, T, H>
where
    T: Decode,
    H: BuildHasher + Default,
{
    fn type_name() -> Cow<'static, str> {
        map_type_name::<T>()
    }

    fn from_value(value: &Value, decoder: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        decode_entries(value, decoder)
    }
}
