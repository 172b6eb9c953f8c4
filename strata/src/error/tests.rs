use std::error::Error as _;
use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::{StrataResult, StrataResultExt};

#[rstest]
fn coerce_error_exposes_its_cause() {
    let inner = CoerceError::new(json!(true), "string");
    let outer = CoerceError::wrapping(json!(["a", true]), "[string]", inner.clone());
    let source = outer.source().expect("wrapped cause");
    assert_eq!(source.to_string(), "unable to coerce true to string");
    assert_eq!(outer.root_cause(), &inner);
    assert!(inner.source().is_none());
}

#[rstest]
fn coerce_converts_into_strata_error() {
    let result: Result<(), CoerceError> = Err(CoerceError::new(json!("x"), "u8"));
    let err = result.into_strata().expect_err("conversion keeps the error");
    assert_eq!(err.to_string(), r#"unable to coerce "x" to u8"#);
    assert_eq!(err.as_coerce().map(CoerceError::target), Some("u8"));
}

#[rstest]
#[case::conflict(
    StrataError::path_conflict("a.b.c", "a.b"),
    "cannot write 'a.b.c': segment 'a.b' already holds a non-map value"
)]
#[case::not_a_map(
    StrataError::NotAMap { found: "sequence".to_owned() },
    "expected a map of configuration values, found sequence"
)]
#[case::subscription(
    StrataError::NoSuchSubscription { key: "db".to_owned() },
    r#"no such subscription: "db""#
)]
fn messages(#[case] err: StrataError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
    assert!(err.as_coerce().is_none());
}

#[rstest]
fn no_loader_names_extension_and_path() {
    let err = StrataError::NoLoader {
        extension: "ini".to_owned(),
        path: "conf/app.ini".into(),
    };
    assert_eq!(
        err.to_string(),
        r#"no loader for extension "ini" (while loading 'conf/app.ini')"#
    );
}

#[rstest]
fn io_errors_pass_through_verbatim() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let result: StrataResult<()> = Err(io).into_strata();
    let err = result.expect_err("io error");
    assert_eq!(err.to_string(), "missing.toml");
    assert!(matches!(Arc::as_ref(&err), StrataError::Io(_)));
}
