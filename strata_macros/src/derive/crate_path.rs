//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[strata(crate = "...")]` attribute value into the
//! path prefixed to every item referenced by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute, defaulting to
/// `strata`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { strata }, |path| quote! { #path })
}
