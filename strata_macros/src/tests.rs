//! Unit tests for attribute parsing and token generation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use crate::derive::generate::generate;
use crate::derive::parse::{default_key, parse_field_attrs, parse_input, parse_struct_attrs};

#[rstest]
#[case::plain(parse_quote!(host), "host")]
#[case::mixed_case(parse_quote!(maxRetries), "maxretries")]
#[case::raw(parse_quote!(r#type), "type")]
fn default_keys(#[case] ident: syn::Ident, #[case] expected: &str) {
    assert_eq!(default_key(&ident), expected);
}

#[rstest]
fn field_attrs_collect_rename_and_skip() -> Result<()> {
    let renamed: syn::Field = parse_quote! {
        #[strata(rename = "port-number", future_option = 3)]
        port: u16
    };
    let attrs = parse_field_attrs(&renamed.attrs)?;
    ensure!(attrs.rename.as_deref() == Some("port-number"), "rename lost");
    ensure!(!attrs.skip, "field should not be skipped");

    let ignored: syn::Field = parse_quote! {
        #[strata(ignore)]
        cache: Vec<String>
    };
    ensure!(parse_field_attrs(&ignored.attrs)?.skip, "ignore not honoured");
    Ok(())
}

#[rstest]
#[case::not_string(parse_quote! { #[strata(rename = 5)] port: u16 }, "rename must be a string")]
#[case::empty(parse_quote! { #[strata(rename = "")] port: u16 }, "rename must not be empty")]
fn invalid_rename(#[case] field: syn::Field, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_field_attrs(&field.attrs) else {
        return Err(anyhow!("expected an error for {message}"));
    };
    ensure!(err.to_string() == message, "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn struct_attr_sets_crate_path() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[strata(crate = "deps::strata")]
        struct Settings { port: u16 }
    };
    let attrs = parse_struct_attrs(&input.attrs)?;
    let path = attrs.crate_path.ok_or_else(|| anyhow!("crate path missing"))?;
    ensure!(path.segments.len() == 2, "unexpected path {path:?}");
    Ok(())
}

#[rstest]
fn parse_input_drops_skipped_fields() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            Host: String,
            #[strata(skip)]
            cache: Vec<String>,
            #[strata(rename = "db")]
            database: Database,
        }
    };
    let record = parse_input(&input)?;
    let keys: Vec<_> = record.fields.iter().map(|field| field.key.as_str()).collect();
    ensure!(keys == ["host", "db"], "unexpected keys {keys:?}");
    Ok(())
}

#[rstest]
#[case::tuple(parse_quote! { struct Pair(u8, u8); }, "Decode requires named fields")]
#[case::enumeration(parse_quote! { enum Mode { A } }, "Decode can only be derived for structs")]
fn rejects_unsupported_shapes(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error for {message}"));
    };
    ensure!(err.to_string() == message, "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn generates_field_lookups_in_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Server {
            host: String,
            #[strata(rename = "listen-port")]
            port: u16,
        }
    };
    let tokens = generate(&parse_input(&input)?).to_string();
    let host = tokens
        .find(r#"decoder . field ("host" , & mut self . host)"#)
        .ok_or_else(|| anyhow!("host lookup missing: {tokens}"))?;
    let port = tokens
        .find(r#"decoder . field ("listen-port" , & mut self . port)"#)
        .ok_or_else(|| anyhow!("port lookup missing: {tokens}"))?;
    ensure!(host < port, "fields out of declaration order");
    ensure!(
        tokens.contains("impl strata :: decode :: Record for Server"),
        "record impl missing: {tokens}"
    );
    ensure!(
        tokens.contains("Self : :: core :: default :: Default"),
        "default bound missing: {tokens}"
    );
    ensure!(
        tokens.contains("strata :: decode :: record_if_found (decoder)"),
        "absent-record hook missing: {tokens}"
    );
    Ok(())
}

#[rstest]
fn generic_records_bound_field_types() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T> {
            inner: T,
        }
    };
    let tokens = generate(&parse_input(&input)?).to_string();
    ensure!(
        tokens.contains("T : strata :: decode :: Decode"),
        "field bound missing: {tokens}"
    );
    Ok(())
}
