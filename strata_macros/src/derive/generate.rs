//! Token generation for `#[derive(Decode)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{WhereClause, parse_quote};

use super::crate_path;
use super::parse::ParsedRecord;

/// Where clause for the generated impls. Generic structs get a
/// `Decode` bound per decoded field type.
fn where_clause(record: &ParsedRecord, krate: &TokenStream) -> Option<WhereClause> {
    let mut clause = record.generics.where_clause.clone();
    if record.generics.type_params().next().is_none() {
        return clause;
    }
    let predicates = &mut clause
        .get_or_insert_with(|| parse_quote! { where })
        .predicates;
    for field in &record.fields {
        let ty = &field.ty;
        predicates.push(parse_quote! { #ty: #krate::decode::Decode });
    }
    clause
}

/// Generate the `Record` and `Decode` impls for `record`.
pub(crate) fn generate(record: &ParsedRecord) -> TokenStream {
    let krate = crate_path::resolve(record.crate_path.as_ref());
    let ident = &record.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, _) = record.generics.split_for_impl();
    let record_where = where_clause(record, &krate);
    let mut decode_where = record_where
        .clone()
        .unwrap_or_else(|| parse_quote! { where });
    decode_where
        .predicates
        .push(parse_quote! { Self: ::core::default::Default });

    let fields = record.fields.iter().map(|field| {
        let member = &field.ident;
        let key = &field.key;
        quote! { decoder.field(#key, &mut self.#member)?; }
    });
    let unused = record.fields.is_empty().then(|| quote! { let _ = decoder; });

    quote! {
        impl #impl_generics #krate::decode::Record for #ident #ty_generics #record_where {
            fn decode_fields(
                &mut self,
                decoder: &mut #krate::decode::Decoder<'_>,
            ) -> ::core::result::Result<(), #krate::CoerceError> {
                #unused
                #( #fields )*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics #krate::decode::Decode for #ident #ty_generics #decode_where {
            fn type_name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(#name)
            }

            fn from_value(
                _: &#krate::Value,
                decoder: &mut #krate::decode::Decoder<'_>,
            ) -> ::core::result::Result<Self, #krate::CoerceError> {
                #krate::decode::record_from_namespace(decoder)
            }

            fn assign(
                &mut self,
                _: &#krate::Value,
                decoder: &mut #krate::decode::Decoder<'_>,
            ) -> ::core::result::Result<(), #krate::CoerceError> {
                #krate::decode::Record::decode_fields(self, decoder)
            }

            fn assign_missing(
                &mut self,
                decoder: &mut #krate::decode::Decoder<'_>,
            ) -> ::core::result::Result<(), #krate::CoerceError> {
                #krate::decode::Record::decode_fields(self, decoder)
            }

            fn from_missing(
                decoder: &mut #krate::decode::Decoder<'_>,
            ) -> ::core::result::Result<::core::option::Option<Self>, #krate::CoerceError> {
                #krate::decode::record_if_found(decoder)
            }
        }
    }
}
