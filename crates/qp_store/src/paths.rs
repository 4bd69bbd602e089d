//! Storage root layout.
//!
//! Callers hand a sanitized username to the `*_file` helpers; sanitation
//! itself lives in `qp_proto::username` and is applied by the owning
//! component before any path is built.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::StoreError;

const APP_QUALIFIER: &str = "io";
const APP_ORG: &str = "quietpost";
const APP_NAME: &str = "quietpost";

/// The storage root and its three fixed subdirectories.
#[derive(Debug, Clone)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Use an explicit root — embedders and tests.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Per-user OS data directory (`~/.local/share/quietpost` on Linux).
    pub fn default_root() -> Result<Self, StoreError> {
        let dirs =
            ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir()))
    }

    /// Create `users/`, `keys/` and `messages/` if missing. Idempotent.
    pub fn create_dirs(&self) -> Result<(), StoreError> {
        fs::create_dir_all(self.users_dir())?;
        fs::create_dir_all(self.keys_dir())?;
        fs::create_dir_all(self.messages_dir())?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    pub fn keys_dir(&self) -> PathBuf {
        self.root.join("keys")
    }

    pub fn messages_dir(&self) -> PathBuf {
        self.root.join("messages")
    }

    pub fn user_file(&self, username: &str) -> PathBuf {
        self.users_dir().join(format!("{username}.json"))
    }

    pub fn key_file(&self, username: &str) -> PathBuf {
        self.keys_dir().join(format!("{username}.key"))
    }

    pub fn message_log(&self, username: &str) -> PathBuf {
        self.messages_dir().join(format!("{username}.json"))
    }

    /// Lock sidecar next to a recipient's log. Only its existence and
    /// ownership matter; the content is never read.
    pub fn message_lock(&self, username: &str) -> PathBuf {
        self.messages_dir().join(format!("{username}.json.lock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_dirs_is_idempotent() {
        let dir = tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        paths.create_dirs().unwrap();
        paths.create_dirs().unwrap();
        assert!(paths.users_dir().is_dir());
        assert!(paths.keys_dir().is_dir());
        assert!(paths.messages_dir().is_dir());
    }

    #[test]
    fn files_land_in_their_subdirs() {
        let paths = StorePaths::new("/data");
        assert_eq!(paths.user_file("alice"), PathBuf::from("/data/users/alice.json"));
        assert_eq!(paths.key_file("alice"), PathBuf::from("/data/keys/alice.key"));
        assert_eq!(paths.message_log("bob"), PathBuf::from("/data/messages/bob.json"));
        assert_eq!(
            paths.message_lock("bob"),
            PathBuf::from("/data/messages/bob.json.lock")
        );
    }
}
