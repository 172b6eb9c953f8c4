//! Loading files and directories into the File level.

use anyhow::{Result, ensure};
use camino::Utf8Path;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use strata::{ConfigLevel, Registry, StrataError, StrataResult};
use test_helpers::fixtures::ConfigDir;

#[fixture]
fn dir() -> ConfigDir {
    ConfigDir::new().expect("temp dir")
}

#[rstest]
fn file_values_sit_below_environment_and_above_defaults(dir: ConfigDir) -> Result<()> {
    let path = dir.write("app.json", r#"{"port": 8080, "host": "file"}"#)?;
    let mut registry = Registry::new();
    registry.set_default("port", 80)?;
    registry.set_level(ConfigLevel::ENVIRONMENT, "host", "env")?;
    registry.load_file(&path)?;

    ensure!(registry.find("port") == Some(json!(8080)));
    ensure!(registry.find("host") == Some(json!("env")));
    Ok(())
}

#[rstest]
fn relative_paths_resolve_against_the_working_directory() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("settings.json", r#"{"mode": "relative"}"#)?;
        let mut registry = Registry::new();
        registry
            .load_file("settings.json")
            .map_err(|err| err.to_string())?;
        assert_eq!(registry.find("mode"), Some(json!("relative")));
        Ok(())
    });
}

#[rstest]
fn unregistered_extension_is_reported(dir: ConfigDir) {
    let path = dir.write("app.conf", "port=1").expect("write");
    let err = Registry::new().load_file(&path).expect_err("no loader");
    assert!(matches!(
        err.as_ref(),
        StrataError::NoLoader { extension, .. } if extension == "conf"
    ));
}

fn key_value(contents: &str) -> StrataResult<Value> {
    let map = contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), json!(value.trim())))
        .collect();
    Ok(Value::Object(map))
}

#[rstest]
fn custom_extensions_can_be_registered(dir: ConfigDir) -> Result<()> {
    let path = dir.write("app.conf", "port = 1\nhost = h\n")?;
    let mut registry = Registry::new();
    ensure!(registry.register_extension("conf", key_value).is_none());
    registry.load_file(&path)?;
    ensure!(registry.find("port") == Some(json!("1")));
    ensure!(
        Registry::new().loaders().get("conf").is_none(),
        "extension leaked into a fresh registry"
    );
    Ok(())
}

#[rstest]
fn directories_load_in_sorted_order(dir: ConfigDir) -> Result<()> {
    dir.write("10-base.json", r#"{"level": "base", "base": true}"#)?;
    dir.write("20-site.json", r#"{"level": "site"}"#)?;
    dir.write("README.txt", "not configuration")?;
    dir.write("nested/30-deep.json", r#"{"level": "deep"}"#)?;

    let mut shallow = Registry::new();
    shallow.load_directory(dir.path(), false)?;
    ensure!(shallow.find("level") == Some(json!("site")));
    ensure!(shallow.find("base") == Some(json!(true)));

    let mut deep = Registry::new();
    deep.load_directory(dir.path(), true)?;
    ensure!(deep.find("level") == Some(json!("deep")));
    Ok(())
}

#[rstest]
fn directory_load_stops_at_first_failure(dir: ConfigDir) {
    dir.write("a.json", r#"{"a": 1}"#).expect("write");
    dir.write("b.json", "{ not json").expect("write");
    dir.write("c.json", r#"{"c": 1}"#).expect("write");

    let mut registry = Registry::new();
    let err = registry
        .load_directory(dir.path(), false)
        .expect_err("malformed file");
    assert!(matches!(err.as_ref(), StrataError::Json(_)));
    assert_eq!(registry.find("a"), Some(json!(1)));
    assert_eq!(registry.find("c"), None);
}

#[rstest]
fn missing_directory_is_an_io_error() {
    let err = Registry::new()
        .load_directory(Utf8Path::new("/definitely/not/here"), true)
        .expect_err("missing dir");
    assert!(matches!(err.as_ref(), StrataError::Io(_)));
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_files_feed_typed_decoding(dir: ConfigDir) {
    #[derive(Default, strata::Decode)]
    struct Server {
        port: u16,
        tls: bool,
    }

    #[derive(Default, strata::Decode)]
    struct Root {
        server: Server,
    }

    let path = dir
        .write("server.toml", "[server]\nport = 8443\ntls = true\n")
        .expect("write");
    let mut registry = Registry::new();
    registry.load_file(&path).expect("load");

    let mut root = Root::default();
    registry.decode(&mut root).expect("decode");
    assert_eq!(root.server.port, 8443);
    assert!(root.server.tls);
}
