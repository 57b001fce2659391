use json_mirror::{Registry, StoreOptions};
use serde_json::json;

fn main() -> Result<(), json_mirror::Error> {
    let path = std::env::temp_dir().join("json_mirror_demo_basic.json");
    let registry = Registry::new();
    let store = registry.acquire(&path, StoreOptions::new())?;

    // set / get / remove
    store.set("apples", json!(3))?;
    store.set("bananas", json!(5))?;
    println!("apples  = {:?}", store.get("apples"));
    println!("bananas = {:?}", store.get("bananas"));

    // conditional update: absent starts the counter at 1
    store.update("visits", |v| match v {
        None => json!(1),
        Some(v) => json!(v.as_i64().unwrap_or(0) + 1),
    })?;
    println!("visits = {:?}", store.get("visits"));

    // batch with the _local variants, persist once
    for i in 0..5 {
        store.set_local(format!("bulk{i}"), json!(i));
    }
    store.save()?;

    // a second acquisition sees the same mirror
    let again = registry.acquire(&path, StoreOptions::new())?;
    println!("shared view: {} entries", again.len());
    println!("keys = {:?}", again.keys());

    store.clear()?;
    println!("after clear: empty = {}", store.is_empty());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
