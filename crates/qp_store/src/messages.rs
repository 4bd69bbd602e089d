//! Per-recipient message log.
//!
//! Append-only array of envelopes, one JSON file per recipient. Order is
//! arrival order at the store, not the sender-claimed timestamp.
//!
//! An append is all-or-nothing: validate, take the recipient's lock
//! within the bounded wait, rewrite the whole log through a temp file and
//! atomic rename. Reads never lock and never fail on a bad log — a
//! corrupted file is an operator problem (logged), not a caller problem.

use std::fs;
use std::path::Path;
use std::time::Duration;

use qp_proto::{sanitize_username, Envelope};

use crate::atomic;
use crate::error::StoreError;
use crate::lock::{LogLock, DEFAULT_LOCK_TIMEOUT};
use crate::paths::StorePaths;

#[derive(Debug, Clone)]
pub struct MessageStore {
    paths: StorePaths,
    lock_timeout: Duration,
}

impl MessageStore {
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the bound on lock acquisition (default 5 s).
    pub fn with_lock_timeout(paths: StorePaths, lock_timeout: Duration) -> Self {
        Self {
            paths,
            lock_timeout,
        }
    }

    /// Append one envelope to its recipient's log.
    pub fn append(&self, envelope: &Envelope) -> Result<(), StoreError> {
        envelope.validate()?;
        let recipient = sanitize_username(&envelope.to_user)?;
        self.paths.create_dirs()?;

        let log_path = self.paths.message_log(&recipient);
        let _lock = LogLock::acquire(&self.paths.message_lock(&recipient), self.lock_timeout)?;

        let mut log = read_log(&log_path);
        log.push(envelope.clone());
        atomic::write_json(&log_path, &log)
        // lock released here on success and on every error path above
    }

    /// All envelopes for `username`, in arrival order. Best-effort: an
    /// absent or corrupted log is an empty one.
    pub fn fetch(&self, username: &str) -> Result<Vec<Envelope>, StoreError> {
        let username = sanitize_username(username)?;
        Ok(read_log(&self.paths.message_log(&username)))
    }

    /// Delete a recipient's log entirely. No soft-delete, no audit trail.
    pub fn clear(&self, username: &str) -> Result<(), StoreError> {
        let username = sanitize_username(username)?;
        match fs::remove_file(self.paths.message_log(&username)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_log(path: &Path) -> Vec<Envelope> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&data) {
        Ok(log) => log,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "message log corrupted; treating as empty");
            Vec::new()
        }
    }
}
