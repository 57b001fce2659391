//! Snapshot policy and the background snapshot worker.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Where and how often periodic snapshots of the backing file are taken.
///
/// The worker copies the backing file's current on-disk bytes, not the
/// in-memory mirror — an unsaved mirror is invisible to snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotPolicy {
    /// Directory the snapshot files land in. Created at store construction
    /// if missing (one level — its parent must exist).
    pub dir: PathBuf,
    /// Time between snapshots. Must be non-zero.
    pub interval: Duration,
}

impl SnapshotPolicy {
    /// Snapshot into `dir` every `interval`.
    pub fn new(dir: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            dir: dir.into(),
            interval,
        }
    }
}

/// Background thread that runs a snapshot closure on a timer.
///
/// Stoppable via [`stop`](Self::stop) and joins the thread on drop so
/// nothing outlives its owning store.
pub struct SnapshotWorker {
    stop: Arc<AtomicBool>,
    tx: Option<mpsc::SyncSender<()>>,
    join_handle: Option<thread::JoinHandle<()>>,
}

impl SnapshotWorker {
    /// Spawn a worker invoking `task` every `interval` until stopped.
    pub fn start<F>(interval: Duration, task: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let (tx, rx) = mpsc::sync_channel::<()>(0);

        let join_handle = thread::spawn(move || loop {
            if stop_flag.load(Ordering::Relaxed) {
                break;
            }
            match rx.recv_timeout(interval) {
                Err(mpsc::RecvTimeoutError::Timeout) => task(),
                // A message or a hung-up sender both mean "shut down now".
                Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop,
            tx: Some(tx),
            join_handle: Some(join_handle),
        }
    }

    /// Stop the timer and wait for the thread to exit. Idempotent. After
    /// this returns no further snapshots will be taken.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        drop(self.tx.take());
        if let Some(h) = self.join_handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for SnapshotWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SnapshotWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotWorker")
            .field("running", &self.join_handle.is_some())
            .finish()
    }
}
