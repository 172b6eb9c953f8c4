//! Attribute and field parsing for `#[derive(Decode)]`.

use syn::parenthesized;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, Lit, LitStr, Token, Type};

/// Metadata collected from `#[strata(...)]` on the struct.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub crate_path: Option<syn::Path>,
}

/// Metadata collected from `#[strata(...)]` on a field.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
}

/// A field that takes part in decoding.
pub(crate) struct ParsedField {
    pub ident: Ident,
    pub ty: Type,
    pub key: String,
}

/// Everything the generator needs from the input struct.
pub(crate) struct ParsedRecord {
    pub ident: Ident,
    pub generics: Generics,
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<ParsedField>,
}

/// Iterate all `#[strata(...)]` attributes once and apply a callback.
fn parse_strata<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("strata")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Parses a string literal value for `key`.
fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let lit = meta.value()?.parse::<Lit>()?;
    match lit {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Extracts struct-level metadata. Unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_strata(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let path = lit_str(meta, "crate")?.parse::<syn::Path>()?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Extracts field-level metadata. Unknown keys are ignored.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_strata(attrs, |meta| {
        if meta.path.is_ident("rename") {
            let key = lit_str(meta, "rename")?;
            if key.value().is_empty() {
                return Err(syn::Error::new(key.span(), "rename must not be empty"));
            }
            out.rename = Some(key.value());
            Ok(())
        } else if meta.path.is_ident("skip") || meta.path.is_ident("ignore") {
            out.skip = true;
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Lookup key for a field without `rename`: the identifier, lowercased,
/// without any raw-identifier prefix.
pub(crate) fn default_key(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").unwrap_or(&name).to_lowercase()
}

/// Parse the derive input into a [`ParsedRecord`].
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedRecord> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Decode can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "Decode requires named fields",
        ));
    };
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let mut fields = Vec::new();
    for field in &named.named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Decode requires named fields"));
        };
        let key = attrs.rename.unwrap_or_else(|| default_key(&ident));
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            key,
        });
    }
    Ok(ParsedRecord {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        crate_path: struct_attrs.crate_path,
        fields,
    })
}
