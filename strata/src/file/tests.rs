use camino::Utf8Path;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::fixtures::ConfigDir;

use super::*;
use crate::StrataError;

#[fixture]
fn dir() -> ConfigDir {
    ConfigDir::new().expect("temp dir")
}

fn fixed(_: &str) -> StrataResult<Value> {
    Ok(json!({"fixed": true}))
}

#[rstest]
fn defaults_include_json() {
    let loaders = FileLoaders::default();
    assert!(loaders.extensions().contains(&"json"));
    #[cfg(feature = "toml")]
    assert!(loaders.extensions().contains(&"toml"));
    #[cfg(feature = "yaml")]
    assert!(loaders.supports(Utf8Path::new("app.yml")));
    assert!(!loaders.supports(Utf8Path::new("app.ini")));
    assert!(!loaders.supports(Utf8Path::new("Makefile")));
}

#[rstest]
fn registration_is_case_insensitive_and_replaces() {
    let mut loaders = FileLoaders::empty();
    assert!(loaders.register(".INI", fixed).is_none());
    assert!(loaders.supports(Utf8Path::new("conf/app.Ini")));
    assert!(loaders.register("ini", parser::json).is_some());
    assert_eq!(loaders.extensions(), vec!["ini"]);
}

#[rstest]
fn loads_json_into_a_map(dir: ConfigDir) {
    let path = dir
        .write("app.JSON", r#"{"server": {"port": 8080}}"#)
        .expect("write");
    let data = FileLoaders::default().load(&path).expect("load");
    assert_eq!(Value::Object(data), json!({"server": {"port": 8080}}));
}

#[rstest]
fn empty_document_is_an_empty_map(dir: ConfigDir) {
    let mut loaders = FileLoaders::empty();
    loaders.register("null", |_| Ok(Value::Null));
    let path = dir.write("blank.null", "").expect("write");
    assert!(loaders.load(&path).expect("load").is_empty());
}

#[rstest]
fn missing_file_is_an_io_error_even_without_loader(dir: ConfigDir) {
    let err = FileLoaders::default()
        .load(&dir.path().join("absent.ini"))
        .expect_err("missing file");
    assert!(matches!(err.as_ref(), StrataError::Io(io) if io.kind() == std::io::ErrorKind::NotFound));
}

#[rstest]
fn unknown_extension_reports_no_loader(dir: ConfigDir) {
    let path = dir.write("app.ini", "port = 1").expect("write");
    let err = FileLoaders::default().load(&path).expect_err("no loader");
    assert!(matches!(
        err.as_ref(),
        StrataError::NoLoader { extension, path: reported }
            if extension == "ini" && reported == path.as_std_path()
    ));
}

#[rstest]
#[case::malformed("{\"port\": ", "Json")]
#[case::sequence("[1, 2]", "NotAMap")]
fn parse_failures(dir: ConfigDir, #[case] contents: &str, #[case] kind: &str) {
    let path = dir.write("bad.json", contents).expect("write");
    let err = FileLoaders::default().load(&path).expect_err("bad document");
    let actual = match err.as_ref() {
        StrataError::Json(_) => "Json",
        StrataError::NotAMap { .. } => "NotAMap",
        _ => "other",
    };
    assert_eq!(actual, kind);
}

#[cfg(feature = "toml")]
#[rstest]
fn loads_toml(dir: ConfigDir) {
    let path = dir
        .write("app.toml", "[db]\nhost = \"localhost\"\nport = 5432\n")
        .expect("write");
    let data = FileLoaders::default().load(&path).expect("load");
    assert_eq!(
        Value::Object(data),
        json!({"db": {"host": "localhost", "port": 5432}})
    );
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_keeps_yes_as_string(dir: ConfigDir) {
    let path = dir.write("app.yaml", "enabled: yes\nstrict: true\n").expect("write");
    let data = FileLoaders::default().load(&path).expect("load");
    assert_eq!(
        Value::Object(data),
        json!({"enabled": "yes", "strict": true})
    );
}

#[rstest]
fn discover_filters_and_sorts(dir: ConfigDir) {
    dir.write("b.json", "{}").expect("write");
    dir.write("a.json", "{}").expect("write");
    dir.write("notes.txt", "ignored").expect("write");
    dir.write("nested/c.json", "{}").expect("write");

    let loaders = FileLoaders::default();
    let shallow = loaders.discover(dir.path(), false).expect("walk");
    assert_eq!(
        shallow,
        vec![dir.path().join("a.json"), dir.path().join("b.json")]
    );

    let deep = loaders.discover(dir.path(), true).expect("walk");
    assert_eq!(
        deep,
        vec![
            dir.path().join("a.json"),
            dir.path().join("b.json"),
            dir.path().join("nested/c.json"),
        ]
    );
}

#[rstest]
fn discover_missing_directory_fails(dir: ConfigDir) {
    let err = FileLoaders::default()
        .discover(&dir.path().join("nope"), true)
        .expect_err("missing dir");
    assert!(matches!(err.as_ref(), StrataError::Io(_)));
}
