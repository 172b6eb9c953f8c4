//! Expansion of `#[derive(Decode)]`.

pub(crate) mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and generate the trait impls.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    Ok(generate::generate(&record))
}
