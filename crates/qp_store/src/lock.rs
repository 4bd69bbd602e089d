//! Bounded-wait advisory lock on a sidecar file.
//!
//! One lock file per message log. Acquisition polls `flock`-style
//! exclusive locks until a deadline; hitting the deadline fails the whole
//! operation with nothing written. The guard releases on drop on every
//! exit path. The sidecar is left in place after release — its existence
//! carries no meaning, only holding the OS lock does.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::StoreError;

/// Default bound on how long a writer waits for a contended log.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Exclusive lock on one recipient's log, released on drop.
#[derive(Debug)]
pub struct LogLock {
    file: File,
    path: PathBuf,
}

impl LogLock {
    /// Block until the lock is held or `timeout` has elapsed.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).write(true).open(path)?;
        let deadline = Instant::now() + timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    })
                }
                // Only genuine contention is worth waiting out; a real
                // I/O failure will not clear by polling.
                Err(e) if !is_contention(&e) => return Err(StoreError::Io(e)),
                Err(_) if Instant::now() < deadline => std::thread::sleep(POLL_INTERVAL),
                Err(_) => {
                    return Err(StoreError::LockTimeout {
                        path: path.to_path_buf(),
                        timeout,
                    })
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_contention(e: &std::io::Error) -> bool {
    e.kind() == fs2::lock_contended_error().kind()
}

impl Drop for LogLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release log lock");
        }
    }
}
