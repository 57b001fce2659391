//! Core store type and its construction options.

use crate::error::{Error, Result};
use crate::persist;
use crate::serializer::{JsonSerializer, Serializer};
use crate::snapshot::{SnapshotPolicy, SnapshotWorker};
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Construction options for a [`Store`].
///
/// ```rust,no_run
/// use json_mirror::{Store, StoreOptions};
/// use std::time::Duration;
///
/// let store = Store::with_options(
///     "settings.json",
///     StoreOptions::new()
///         .indented(true)
///         .snapshots("backups", Duration::from_secs(600)),
/// ).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub(crate) snapshots: Option<SnapshotPolicy>,
    pub(crate) indented: bool,
    pub(crate) force_new: bool,
}

impl StoreOptions {
    /// Default options: compact JSON, no snapshots, shared via the registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn indented(mut self, yes: bool) -> Self {
        self.indented = yes;
        self
    }

    /// Periodically copy the backing file into `dir`, once per `interval`.
    /// `dir` must be non-empty and `interval` non-zero or construction fails
    /// with [`Error::InvalidArgument`].
    pub fn snapshots(mut self, dir: impl Into<PathBuf>, interval: Duration) -> Self {
        self.snapshots = Some(SnapshotPolicy::new(dir, interval));
        self
    }

    /// Ask the [`Registry`](crate::Registry) for a private instance instead
    /// of the shared one for this path. Ignored when constructing a `Store`
    /// directly.
    pub fn force_new(mut self, yes: bool) -> Self {
        self.force_new = yes;
        self
    }
}

/// Persistent key-value store: one in-memory mirror synchronized with one
/// backing JSON file.
///
/// Every key operation comes in two flavors: the plain variant persists the
/// whole mirror to disk immediately, the `_local` variant only touches the
/// mirror and leaves persistence to a later [`save`](Self::save). The
/// `_local` variants exist because the immediate ones cost a full-file
/// serialize-and-write per call, which is the wrong tool for bulk loops.
///
/// **Single-process only.** Another process writing the same file goes
/// unnoticed until an explicit [`load`](Self::load).
pub struct Store {
    path: PathBuf,
    serializer: JsonSerializer,
    mirror: RwLock<Map<String, Value>>,
    worker: Mutex<Option<SnapshotWorker>>,
}

impl Store {
    /// Open (or create) a store at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Store> {
        Self::with_options(path, StoreOptions::new())
    }

    /// Open (or create) a store at `path`.
    ///
    /// Creates the backing file with an empty mapping (`{}`) if it does not
    /// exist, creating one level of parent directory if needed. An existing
    /// file is loaded into the mirror; a file whose top level is not a JSON
    /// object fails with [`Error::Format`] and no store is produced.
    pub fn with_options(path: impl AsRef<Path>, options: StoreOptions) -> Result<Store> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("file path must not be empty".into()));
        }

        if let Some(policy) = &options.snapshots {
            if policy.dir.as_os_str().is_empty() {
                return Err(Error::InvalidArgument(
                    "snapshot directory must not be empty".into(),
                ));
            }
            if policy.interval.is_zero() {
                return Err(Error::InvalidArgument(
                    "snapshot interval must be non-zero".into(),
                ));
            }
            persist::ensure_dir(&policy.dir)?;
        }

        let serializer = if options.indented {
            JsonSerializer::indented()
        } else {
            JsonSerializer::new()
        };

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    persist::ensure_dir(parent)?;
                }
            }
            let empty = serializer.serialize(&Map::new())?;
            persist::write(path, &empty)?;
        }

        let mirror = persist::load(path, &serializer)?;

        let worker = options.snapshots.as_ref().map(|policy| {
            let src = path.to_path_buf();
            let dir = policy.dir.clone();
            // best effort: a failed tick is dropped, the next one retries
            SnapshotWorker::start(policy.interval, move || {
                let _ = persist::copy_snapshot(&src, &dir);
            })
        });

        Ok(Store {
            path: path.to_path_buf(),
            serializer,
            mirror: RwLock::new(mirror),
            worker: Mutex::new(worker),
        })
    }

    // ---- reads ----

    /// Get the value for `key`, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.mirror.read().get(key).cloned()
    }

    /// `true` iff `key` is an entry of the mirror. A key explicitly set to
    /// `Value::Null` still counts as present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.mirror.read().contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mirror.read().len()
    }

    /// `true` when the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.mirror.read().keys().cloned().collect()
    }

    /// All values, in key insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.mirror.read().values().cloned().collect()
    }

    /// All key-value pairs, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.mirror
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- writes ----

    /// Upsert `key` and persist the mirror.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Result<()> {
        self.set_local(key, value);
        self.save()
    }

    /// Upsert `key` in the mirror only.
    pub fn set_local(&self, key: impl Into<String>, value: Value) {
        self.mirror.write().insert(key.into(), value);
    }

    /// Read the current value for `key` (absent → `None`), write back
    /// `f(current)`, and persist. Returns the new value.
    ///
    /// `f` should be a pure synchronous transform; the store expects no
    /// side effects from it.
    pub fn update<F>(&self, key: impl Into<String>, f: F) -> Result<Value>
    where
        F: FnOnce(Option<Value>) -> Value,
    {
        let new = self.update_local(key, f);
        self.save()?;
        Ok(new)
    }

    /// [`update`](Self::update) against the mirror only.
    pub fn update_local<F>(&self, key: impl Into<String>, f: F) -> Value
    where
        F: FnOnce(Option<Value>) -> Value,
    {
        let key = key.into();
        let mut mirror = self.mirror.write();
        let current = mirror.get(&key).cloned();
        let new = f(current);
        mirror.insert(key, new.clone());
        new
    }

    /// Remove `key` (no-op if absent) and persist. Returns the removed
    /// value, if any.
    pub fn remove(&self, key: &str) -> Result<Option<Value>> {
        let prev = self.remove_local(key);
        self.save()?;
        Ok(prev)
    }

    /// Remove `key` from the mirror only.
    pub fn remove_local(&self, key: &str) -> Option<Value> {
        self.mirror.write().shift_remove(key)
    }

    /// Drop all entries and persist the now-empty mapping.
    pub fn clear(&self) -> Result<()> {
        self.clear_local();
        self.save()
    }

    /// Drop all entries from the mirror only.
    pub fn clear_local(&self) {
        *self.mirror.write() = Map::new();
    }

    // ---- persistence ----

    /// Re-read the backing file and replace the mirror wholesale, discarding
    /// unsaved local edits. On any failure the mirror keeps its previous
    /// contents.
    pub fn load(&self) -> Result<()> {
        let data = persist::load(&self.path, &self.serializer)?;
        *self.mirror.write() = data;
        Ok(())
    }

    /// Serialize the mirror and overwrite the backing file.
    ///
    /// Not atomic: there is no write-to-temp-then-rename, so a crash
    /// mid-write can leave the file truncated. Accepted limitation for the
    /// small-config use case this store targets.
    pub fn save(&self) -> Result<()> {
        let bytes = {
            let mirror = self.mirror.read();
            self.serializer.serialize(&mirror)?
        };
        persist::write(&self.path, &bytes)
    }

    /// Copy the backing file's current bytes into `dir` under a
    /// `snapshot-<name>-<epochMillis>` name, creating `dir` if missing.
    /// Independent of any configured snapshot policy, and of the mirror —
    /// unsaved edits are not in the copy. Returns the snapshot's path.
    pub fn snapshot(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        persist::copy_snapshot(&self.path, dir.as_ref())
    }

    /// Stop the periodic snapshot worker, if one is running, and wait for
    /// it to exit. Idempotent; also happens automatically on drop.
    pub fn stop_snapshots(&self) {
        if let Some(mut worker) = self.worker.lock().take() {
            worker.stop();
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("snapshots", &self.worker.lock().is_some())
            .finish_non_exhaustive()
    }
}
