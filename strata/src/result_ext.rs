//! Extensions for mapping errors to `StrataResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(StrataError::…(e)))`
//! patterns when converting external error types into the crate's
//! `StrataResult<T>` alias (`Result<T, Arc<StrataError>>`).
//!
//! # Examples
//!
//! ```
//! use strata::{StrataResult, StrataResultExt};
//!
//! fn parse() -> StrataResult<serde_json::Value> {
//!     // serde_json::Error implements Into<StrataError>
//!     serde_json::from_str("{\"port\": 8080}").into_strata()
//! }
//! # assert!(parse().is_ok());
//! ```

use std::sync::Arc;

use crate::{StrataError, StrataResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<StrataError>`
/// into a `StrataResult<T>`.
pub trait StrataResultExt<T, E> {
    /// Convert `Result<T, E>` into `StrataResult<T>` using `Into<StrataError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<StrataError>`.
    fn into_strata(self) -> StrataResult<T>;
}

impl<T, E> StrataResultExt<T, E> for Result<T, E>
where
    E: Into<StrataError>,
{
    fn into_strata(self) -> StrataResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
