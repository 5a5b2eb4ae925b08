// File: tests/persistence.rs
// Cross-session scenarios: every mutation must survive a store reload.
use quickdo::context::{AppContext, TestContext};
use quickdo::store::TaskStore;
use std::fs;
use std::sync::Arc;

#[test]
fn test_mutations_survive_reload() {
    let ctx = Arc::new(TestContext::new());

    let milk;
    {
        let mut store = TaskStore::load(ctx.clone());
        milk = store.add("Buy milk").unwrap().unwrap();
        store.add("Walk dog").unwrap();
        store.set_completed(&milk, true).unwrap();
    }

    let store = TaskStore::load(ctx);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].text, "Walk dog");
    assert_eq!(snapshot[1].text, "Buy milk");
    assert_eq!(snapshot[1].id, milk);
    assert!(snapshot[1].completed);
    assert!(!snapshot[0].completed);
}

#[test]
fn test_clear_persists_an_empty_slot() {
    let ctx = Arc::new(TestContext::new());

    {
        let mut store = TaskStore::load(ctx.clone());
        store.add("Buy milk").unwrap();
        store.clear().unwrap();
    }

    // The slot file itself reflects the empty list
    let raw = fs::read_to_string(ctx.get_tasks_path().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([]));

    assert!(TaskStore::load(ctx).is_empty());
}

#[test]
fn test_emptying_rename_persists_the_deletion() {
    let ctx = Arc::new(TestContext::new());

    {
        let mut store = TaskStore::load(ctx.clone());
        let id = store.add("Buy milk").unwrap().unwrap();
        store.rename(&id, "  ").unwrap();
    }

    assert!(TaskStore::load(ctx).is_empty());
}

#[test]
fn test_reorder_persists_across_reload() {
    let ctx = Arc::new(TestContext::new());

    let (id1, id2);
    {
        let mut store = TaskStore::load(ctx.clone());
        id1 = store.add("First").unwrap().unwrap();
        id2 = store.add("Second").unwrap().unwrap();
        store.reorder(&[id1.clone(), id2.clone()]).unwrap();
    }

    let store = TaskStore::load(ctx);
    let ids: Vec<_> = store.snapshot().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![id1, id2]);
}

#[test]
fn test_missing_id_operations_do_not_touch_the_slot() {
    let ctx = Arc::new(TestContext::new());

    let mut store = TaskStore::load(ctx.clone());
    store.add("Buy milk").unwrap();

    // Wipe the slot behind the store's back, then run no-op operations.
    // Neither may persist, so the slot must stay gone.
    let path = ctx.get_tasks_path().unwrap();
    fs::remove_file(&path).unwrap();

    assert!(!store.set_completed("no-such-id", true).unwrap());
    assert_eq!(
        store.rename("no-such-id", "text").unwrap(),
        quickdo::model::RenameOutcome::NotFound
    );
    assert!(!path.exists());

    // A delete miss persists regardless (idempotent write-through)
    assert!(!store.delete("no-such-id").unwrap());
    assert!(path.exists());
}
