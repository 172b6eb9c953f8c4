//! Change events published by a subscription-wrapped registry.

use std::thread;
use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use strata::{ConfigLevel, Event, LayeredStore, Registry, SubscriptionStore};

fn buffered() -> Registry<SubscriptionStore> {
    Registry::with_store(SubscriptionStore::with_buffer(LayeredStore::new(), 8))
}

#[rstest]
fn subscriber_sees_descendant_write_once() {
    let mut registry = buffered();
    let db = registry.store_mut().subscribe("db");
    registry.set_default("db.host", "x").expect("set");
    assert_eq!(
        db.drain(),
        vec![Event {
            key: "db.host".to_owned(),
            value: json!("x"),
        }]
    );
}

#[rstest]
fn root_subscription_sees_every_write() {
    let mut registry = buffered();
    let root = registry.store_mut().subscribe("");
    registry.set_default("a", 1).expect("set");
    registry.set_override("b.c", 2).expect("set");
    registry
        .merge_serialized(ConfigLevel::FILE, &json!({"d": {"e": 3}}))
        .expect("merge");
    let keys: Vec<_> = root.drain().into_iter().map(|event| event.key).collect();
    assert_eq!(keys, ["a", "b.c", "d.e"]);
}

#[rstest]
fn file_loads_publish_their_leaves() {
    let dir = test_helpers::fixtures::ConfigDir::new().expect("temp dir");
    let path = dir
        .write("app.json", r#"{"db": {"host": "h", "port": 1}}"#)
        .expect("write");
    let mut registry = buffered();
    let db = registry.store_mut().subscribe("db.port");
    registry.load_file(&path).expect("load");
    assert_eq!(
        db.recv_timeout(Duration::from_secs(1)).expect("event"),
        Event {
            key: "db.port".to_owned(),
            value: json!(1),
        }
    );
}

#[rstest]
fn rendezvous_delivery_hands_events_to_a_waiting_reader() {
    let mut registry = Registry::with_store(SubscriptionStore::new(LayeredStore::new()));
    let sub = registry.store_mut().subscribe("jobs");
    let reader = thread::spawn(move || {
        let mut seen = Vec::new();
        while let Ok(event) = sub.recv() {
            seen.push(event.value);
        }
        seen
    });
    for n in 0..5 {
        registry.set_default(&format!("jobs.j{n}"), n).expect("set");
    }
    registry.store_mut().close();
    assert_eq!(
        reader.join().expect("reader thread"),
        (0..5).map(|n| json!(n)).collect::<Vec<_>>()
    );
}

#[rstest]
fn unsubscribed_keys_stop_receiving() {
    let mut registry = buffered();
    let sub = registry.store_mut().subscribe("a");
    registry.store_mut().unsubscribe("a").expect("unsubscribe");
    registry.set_default("a", 1).expect("set");
    assert!(sub.try_recv().is_err());
    assert!(registry.store_mut().unsubscribe("a").is_err());
}
