//! The process-wide registry.

use rstest::rstest;
use serde_json::json;
use serial_test::serial;
use strata::{Decode, decode_global, global};
use test_helpers::env;

#[derive(Debug, Default, Decode)]
struct App {
    name: String,
    workers: u8,
}

#[rstest]
#[serial]
fn handles_share_one_store() {
    let _env = env::scope(vec![env::remove_var("NAME")]);
    let mut writer = global();
    writer.clear();
    writer.set_default("name", "shared").expect("set");

    let reader = global();
    assert_eq!(reader.find("name"), Some(json!("shared")));
    writer.clear();
    assert_eq!(reader.find("name"), None);
}

#[rstest]
#[serial]
fn environment_resolver_is_preinstalled() {
    let _env = env::scope(vec![env::set_var("WORKERS", "4"), env::remove_var("NAME")]);
    let mut registry = global();
    registry.clear();
    registry.set_default("workers", 1).expect("set");
    registry.set_default("name", "svc").expect("set");

    let mut app = App::default();
    decode_global(&mut app).expect("decode");
    assert_eq!(app.name, "svc");
    assert_eq!(app.workers, 4);
    registry.clear();
}

#[rstest]
#[serial]
fn handles_can_cross_threads() {
    let mut registry = global();
    registry.clear();
    std::thread::spawn(|| {
        global().set_override("from.thread", true).expect("set");
    })
    .join()
    .expect("writer thread");
    assert_eq!(registry.find("from.thread"), Some(json!(true)));
    registry.clear();
}
