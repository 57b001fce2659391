//! Disk I/O helpers: load, overwrite-write, and snapshot copies.
//!
//! Writes go straight over the backing file, no temp-file-and-rename dance.
//! A crash mid-write can leave the file truncated; the only detection on the
//! next load is the top-level-shape check. Keep snapshots if that matters.

use crate::error::{Error, Result};
use crate::serializer::Serializer;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads and deserializes the file at `path`. Returns an empty mapping if
/// the file is empty (not an error). A missing file is an error — callers
/// create the file before ever loading it.
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Map<String, Value>> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(Map::new());
    }
    serializer.deserialize(&bytes)
}

/// Overwrite `path` with `bytes` in place.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| Error::Io(e.to_string()))
}

/// Create `dir` if it is missing. One level only — the parent must already
/// exist.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(Error::Io(e.to_string())),
    }
}

/// Copy the current bytes of `src` into `dir` under a timestamped name:
/// `snapshot-<stem>-<epochMillis>` plus the source's extension if it has
/// one. Creates `dir` if missing (one level). Returns the snapshot's path.
///
/// Two snapshots in the same millisecond collide; the second wins.
pub fn copy_snapshot(src: &Path, dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let dest = dir.join(snapshot_name(src, epoch_millis()));
    let bytes = std::fs::read(src).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::write(&dest, bytes).map_err(|e| Error::Io(e.to_string()))?;
    Ok(dest)
}

fn snapshot_name(src: &Path, millis: u128) -> String {
    let stem = src
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    match src.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("snapshot-{stem}-{millis}.{ext}"),
        None => format!("snapshot-{stem}-{millis}"),
    }
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
