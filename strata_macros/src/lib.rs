//! Procedural macros for `strata`.
//!
//! `#[derive(Decode)]` implements `strata::decode::Record` and
//! `strata::decode::Decode` for a struct with named fields. Each field is
//! looked up under its lowercased name relative to the enclosing namespace.
//! Field attributes adjust that:
//!
//! - `#[strata(rename = "key")]` looks the field up under `key`;
//! - `#[strata(skip)]` (or `ignore`) leaves the field at its default.
//!
//! The struct attribute `#[strata(crate = "path")]` points the generated
//! code at a renamed dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `strata::decode::Record` and `strata::decode::Decode`.
///
/// The struct must implement `Default`; decoding a record nested in a
/// sequence or map starts from a default instance.
#[proc_macro_derive(Decode, attributes(strata))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests;
