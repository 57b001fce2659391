use json_mirror::Store;
use serde_json::{json, Value};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("json_mirror_test_{}.json", name))
}

// ---- get / set --------------------------------------------------------------

#[test]
fn set_then_get() {
    let path = temp_path("set_get");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("greeting", json!("hello")).unwrap();
    assert_eq!(store.get("greeting"), Some(json!("hello")));
    assert_eq!(store.get("missing"), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn set_overwrites_existing() {
    let path = temp_path("set_overwrite");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("k", json!(1)).unwrap();
    store.set("k", json!(2)).unwrap();
    assert_eq!(store.get("k"), Some(json!(2)));
    assert_eq!(store.len(), 1);
    let _ = std::fs::remove_file(&path);
}

// ---- contains_key -----------------------------------------------------------

#[test]
fn null_value_still_counts_as_present() {
    let path = temp_path("null_present");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("k", Value::Null).unwrap();
    assert!(store.contains_key("k"));
    assert_eq!(store.get("k"), Some(Value::Null));

    store.clear().unwrap();
    assert!(!store.contains_key("k"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn dotted_keys_are_opaque() {
    let path = temp_path("dotted");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("a.b.c", json!(1)).unwrap();
    assert!(store.contains_key("a.b.c"));
    assert!(!store.contains_key("a"));
    assert_eq!(store.len(), 1);
    let _ = std::fs::remove_file(&path);
}

// ---- update -----------------------------------------------------------------

#[test]
fn update_initializes_then_increments() {
    let path = temp_path("update_counter");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();

    let v = store
        .update("count", |current| match current {
            None => json!(1),
            Some(v) => v,
        })
        .unwrap();
    assert_eq!(v, json!(1));

    for expected in 2..=4_i64 {
        let v = store
            .update("count", |current| {
                let n = current.and_then(|v| v.as_i64()).unwrap_or(0);
                json!(n + 1)
            })
            .unwrap();
        assert_eq!(v, json!(expected));
    }
    assert_eq!(store.get("count"), Some(json!(4)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_sees_absent_key_as_none() {
    let path = temp_path("update_absent");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store
        .update("fresh", |current| {
            assert!(current.is_none());
            json!("created")
        })
        .unwrap();
    assert_eq!(store.get("fresh"), Some(json!("created")));
    let _ = std::fs::remove_file(&path);
}

// ---- remove -----------------------------------------------------------------

#[test]
fn remove_returns_previous_value() {
    let path = temp_path("remove");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("k", json!([1, 2])).unwrap();

    assert_eq!(store.remove("k").unwrap(), Some(json!([1, 2])));
    assert!(!store.contains_key("k"));
    // absent key is a no-op, not an error
    assert_eq!(store.remove("k").unwrap(), None);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn remove_keeps_insertion_order_of_the_rest() {
    let path = temp_path("remove_order");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set_local("a", json!(1));
    store.set_local("b", json!(2));
    store.set_local("c", json!(3));
    store.remove_local("b");
    assert_eq!(store.keys(), vec!["a".to_string(), "c".to_string()]);
    let _ = std::fs::remove_file(&path);
}

// ---- clear ------------------------------------------------------------------

#[test]
fn clear_removes_all_entries() {
    let path = temp_path("clear");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set("a", json!(1)).unwrap();
    store.set("b", json!(2)).unwrap();
    assert_eq!(store.len(), 2);

    store.clear().unwrap();
    assert!(store.is_empty());
    assert!(!store.contains_key("a"));
    assert!(!store.contains_key("b"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn clear_on_empty_store_is_fine() {
    let path = temp_path("clear_empty");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.clear().unwrap();
    assert!(store.is_empty());
    let _ = std::fs::remove_file(&path);
}

// ---- enumeration ------------------------------------------------------------

#[test]
fn enumeration_modes_preserve_insertion_order() {
    let path = temp_path("enumeration");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set_local("a", json!(1));
    store.set_local("b", json!(2));

    assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(store.values(), vec![json!(1), json!(2)]);
    assert_eq!(
        store.entries(),
        vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn insertion_order_is_not_alphabetical() {
    let path = temp_path("enum_unsorted");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    store.set_local("zebra", json!(1));
    store.set_local("apple", json!(2));
    assert_eq!(store.keys(), vec!["zebra".to_string(), "apple".to_string()]);
    let _ = std::fs::remove_file(&path);
}

// ---- misc -------------------------------------------------------------------

#[test]
fn path_accessor() {
    let path = temp_path("path_acc");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    assert_eq!(store.path(), path.as_path());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn debug_impls_dont_panic() {
    let path = temp_path("debug");
    let _ = std::fs::remove_file(&path);
    let store = Store::open(&path).unwrap();
    let dbg = format!("{store:?}");
    assert!(dbg.contains("Store"));
    assert!(dbg.contains("path"));
    let _ = std::fs::remove_file(&path);
}
