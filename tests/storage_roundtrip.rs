// File: tests/storage_roundtrip.rs
// Round-trip and corruption handling for the durable slot.
use quickdo::context::{AppContext, TestContext};
use quickdo::model::Task;
use quickdo::storage::LocalStorage;
use quickdo::store::TaskStore;
use std::fs;
use std::sync::Arc;

#[test]
fn test_roundtrip_preserves_order_and_fields() {
    let ctx = TestContext::new();

    let mut done = Task::new("Walk dog");
    done.completed = true;
    let tasks = vec![done, Task::new("Buy milk"), Task::new("Water plants")];

    LocalStorage::save(&ctx, &tasks).unwrap();
    let loaded = LocalStorage::load(&ctx).unwrap();

    assert_eq!(loaded, tasks);
}

#[test]
fn test_load_without_slot_is_empty() {
    let ctx = TestContext::new();
    assert!(LocalStorage::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_corrupt_slot_loads_as_empty() {
    let ctx = TestContext::new();
    let path = ctx.get_tasks_path().unwrap();

    fs::write(&path, "{ not json at all").unwrap();
    assert!(LocalStorage::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_wrong_shape_loads_as_empty() {
    let ctx = TestContext::new();
    let path = ctx.get_tasks_path().unwrap();

    // Valid JSON, but not a task array
    fs::write(&path, r#"{"id": "x", "text": "y", "completed": false}"#).unwrap();
    assert!(LocalStorage::load(&ctx).unwrap().is_empty());

    fs::write(&path, r#"[{"completed": "soon"}]"#).unwrap();
    assert!(LocalStorage::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_store_recovers_from_corrupt_slot() {
    let ctx = Arc::new(TestContext::new());
    let path = ctx.get_tasks_path().unwrap();
    fs::write(&path, "garbage").unwrap();

    // Fail-open: the store starts empty and stays usable
    let mut store = TaskStore::load(ctx.clone());
    assert!(store.is_empty());

    store.add("Fresh start").unwrap();
    let reloaded = TaskStore::load(ctx);
    assert_eq!(reloaded.snapshot()[0].text, "Fresh start");
}

#[test]
fn test_slot_is_a_plain_json_array() {
    let ctx = Arc::new(TestContext::new());

    let mut store = TaskStore::load(ctx.clone());
    let id = store.add("Buy milk").unwrap().unwrap();

    let raw = fs::read_to_string(ctx.get_tasks_path().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let arr = value.as_array().expect("slot must hold a JSON array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], serde_json::Value::String(id));
    assert_eq!(arr[0]["text"], "Buy milk");
    assert_eq!(arr[0]["completed"], false);
}
