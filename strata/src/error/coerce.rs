//! Coercion failures raised while decoding dynamic values.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// A dynamic value could not be converted to a destination type.
///
/// Sequence and map coercions wrap the failure of the specific element that
/// caused them, reachable through [`std::error::Error::source`] or
/// [`CoerceError::inner`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoerceError {
    value: Value,
    target: Cow<'static, str>,
    inner: Option<Box<CoerceError>>,
}

impl CoerceError {
    /// Build an error for `value` failing to coerce into `target`.
    #[must_use]
    pub fn new(value: Value, target: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value,
            target: target.into(),
            inner: None,
        }
    }

    /// Build an error that wraps the failure of one element of `value`.
    #[must_use]
    pub fn wrapping(value: Value, target: impl Into<Cow<'static, str>>, inner: Self) -> Self {
        Self {
            value,
            target: target.into(),
            inner: Some(Box::new(inner)),
        }
    }

    /// The value that failed to coerce.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Name of the destination type.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The element failure that caused this error, if any.
    #[must_use]
    pub fn inner(&self) -> Option<&Self> {
        self.inner.as_deref()
    }

    /// The innermost failure in the chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(next) = current.inner() {
            current = next;
        }
        current
    }
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to coerce {} to {}", self.value, self.target)?;
        if let Some(inner) = &self.inner {
            write!(f, ": {inner}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CoerceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}
