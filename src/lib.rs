//! Persistent JSON-backed key-value store for small local state.
//!
//! One [`Store`] owns one in-memory mapping (the mirror) kept in sync with
//! one backing JSON file. Mutations come in an immediate-persist flavor and
//! a `_local` flavor for batching; a [`Registry`] hands out one shared
//! instance per file; an optional background worker snapshots the backing
//! file on a timer.
//!
//! ```rust,no_run
//! use json_mirror::{Registry, StoreOptions};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let store = registry.acquire("app.json", StoreOptions::new()).unwrap();
//! store.set("theme", json!("dark")).unwrap();
//! assert_eq!(store.get("theme"), Some(json!("dark")));
//! ```
//!
//! **Single-process only.** If multiple processes open the same file they
//! will clobber each other. Use advisory file locking or a real database for
//! multi-process access.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod persist;
pub mod registry;
pub mod serializer;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
pub use registry::Registry;
pub use snapshot::{SnapshotPolicy, SnapshotWorker};
pub use store::{Store, StoreOptions};
