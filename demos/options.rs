use json_mirror::{Store, StoreOptions};
use serde_json::json;
use std::time::Duration;

fn main() -> Result<(), json_mirror::Error> {
    let path = std::env::temp_dir().join("json_mirror_demo_options.json");
    let backups = std::env::temp_dir().join("json_mirror_demo_backups");

    // indented output + a snapshot of the file every 2 seconds
    let store = Store::with_options(
        &path,
        StoreOptions::new()
            .indented(true)
            .snapshots(&backups, Duration::from_secs(2)),
    )?;

    store.set("name", json!("json-mirror"))?;
    store.set("version", json!("0.1.0"))?;
    store.set("tags", json!(["config", "persistence"]))?;

    // the file on disk is now nicely indented
    let contents = std::fs::read_to_string(store.path())?;
    println!("On-disk JSON:\n{contents}");

    // take a snapshot by hand, independent of the timer
    let snap = store.snapshot(&backups)?;
    println!("manual snapshot at {}", snap.display());

    // the worker is cancellable; it also stops when the store drops
    store.stop_snapshots();

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir_all(&backups);
    Ok(())
}
