//! Coercion into strings, booleans, and numbers.
//!
//! Numeric targets accept numbers that fit without loss and strings that
//! parse as the target type, since environment and flag sources only ever
//! produce strings. Booleans accept the literal strings `true` and `false`.
//! Strings accept strings only.

use std::borrow::Cow;
use std::str::FromStr;

use serde_json::{Number, Value};

use super::{Decode, Decoder};
use crate::CoerceError;

impl Decode for String {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }

    fn from_value(value: &Value, _: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(CoerceError::new(other.clone(), Self::type_name())),
        }
    }
}

impl Decode for bool {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn from_value(value: &Value, _: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) if text == "true" => Ok(true),
            Value::String(text) if text == "false" => Ok(false),
            other => Err(CoerceError::new(other.clone(), Self::type_name())),
        }
    }
}

impl Decode for Value {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("value")
    }

    fn from_value(value: &Value, _: &mut Decoder<'_>) -> Result<Self, CoerceError> {
        Ok(value.clone())
    }
}

fn integer<T>(value: &Value) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    match value {
        Value::Number(number) => from_number(number),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn from_number<T>(number: &Number) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if let Some(signed) = number.as_i64() {
        return <T as TryFrom<i64>>::try_from(signed).ok();
    }
    number
        .as_u64()
        .and_then(|unsigned| <T as TryFrom<u64>>::try_from(unsigned).ok())
}

macro_rules! decode_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn type_name() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }

                fn from_value(value: &Value, _: &mut Decoder<'_>) -> Result<Self, CoerceError> {
                    integer(value).ok_or_else(|| CoerceError::new(value.clone(), Self::type_name()))
                }
            }
        )*
    };
}

decode_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Floats go through their decimal rendering so `f32` narrows by parsing
// rather than by casting.
fn float<T: FromStr>(value: &Value) -> Option<T> {
    match value {
        Value::Number(number) => number.to_string().parse().ok(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

macro_rules! decode_floats {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn type_name() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }

                fn from_value(value: &Value, _: &mut Decoder<'_>) -> Result<Self, CoerceError> {
                    float::<$ty>(value)
                        .filter(|parsed| parsed.is_finite())
                        .ok_or_else(|| CoerceError::new(value.clone(), Self::type_name()))
                }
            }
        )*
    };
}

decode_floats!(f32, f64);
