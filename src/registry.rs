//! Process-wide sharing of store instances, one per backing file.

use crate::error::{Error, Result};
use crate::store::{Store, StoreOptions};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Maps normalized file paths to live [`Store`] instances so that every
/// acquisition of the same file observes the same in-memory mirror.
///
/// Hold one of these at your composition root and hand out stores from it.
/// Entries are never evicted: the set of database files a process touches is
/// expected to be small and bounded, and dropping an entry while callers
/// still hold the `Arc` would just split the shared state.
///
/// ```rust,no_run
/// use json_mirror::{Registry, StoreOptions};
///
/// let registry = Registry::new();
/// let a = registry.acquire("app.json", StoreOptions::new()).unwrap();
/// let b = registry.acquire("app.json", StoreOptions::new()).unwrap();
/// // a and b are the same store
/// ```
#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<PathBuf, Arc<Store>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the store for `path`, constructing it on first acquisition.
    ///
    /// Paths are normalized (made absolute, `.`/`..` resolved) before
    /// lookup, so `./app.json` and its absolute spelling share one store.
    ///
    /// Two things worth knowing:
    /// - when an entry already exists, the `options` passed on this call
    ///   are **ignored** — the options from the first construction remain
    ///   authoritative;
    /// - [`StoreOptions::force_new`] bypasses sharing entirely: the result
    ///   is a private instance that is never registered and never becomes
    ///   the shared one.
    pub fn acquire(&self, path: impl AsRef<Path>, options: StoreOptions) -> Result<Arc<Store>> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("file path must not be empty".into()));
        }
        let canonical = normalize(path)?;

        if options.force_new {
            return Store::with_options(&canonical, options).map(Arc::new);
        }

        // construction happens under the lock so two racing acquisitions
        // cannot build two stores for one path
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&canonical) {
            return Ok(Arc::clone(existing));
        }
        let store = Arc::new(Store::with_options(&canonical, options)?);
        entries.insert(canonical, Arc::clone(&store));
        Ok(store)
    }

    /// Number of registered stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// `true` when no store has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.len())
            .finish()
    }
}

/// Lexical normalization: absolute against the current directory, with `.`
/// and `..` components resolved. Deliberately not `fs::canonicalize` — the
/// backing file may not exist yet, and symlink resolution is more than this
/// store needs.
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::Io(e.to_string()))?
            .join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
