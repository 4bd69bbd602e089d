use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] qp_proto::ValidationError),

    #[error("username already taken: {0}")]
    DuplicateUser(String),

    /// A single append attempt that could not take the log lock in time.
    /// Nothing was written; the caller may retry.
    #[error("timed out after {timeout:?} waiting for the lock on {path}")]
    LockTimeout { path: PathBuf, timeout: Duration },

    /// Kept distinct from `Io` so the auth layer can flatten it into the
    /// same opaque credential failure as a wrong password.
    #[error("no private key blob stored for {0}")]
    KeyBlobMissing(String),

    #[error("cannot determine the default data directory")]
    NoDataDir,
}
