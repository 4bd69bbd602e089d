//! Private-key blob storage — one encrypted PKCS#8 document per user.
//!
//! The blob arrives here already password-encrypted (`qp_crypto::keys`);
//! this module never sees a cleartext key. Overwrite-only: there is no
//! append and no rotation path.

use std::fs;

use qp_proto::sanitize_username;

use crate::atomic;
use crate::error::StoreError;
use crate::paths::StorePaths;

#[derive(Debug, Clone)]
pub struct KeyBlobStore {
    paths: StorePaths,
}

impl KeyBlobStore {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Persist a user's encrypted key blob, replacing any previous one.
    pub fn store(&self, username: &str, sealed_pem: &str) -> Result<(), StoreError> {
        let username = sanitize_username(username)?;
        self.paths.create_dirs()?;
        atomic::write_text(&self.paths.key_file(&username), sealed_pem)
    }

    /// Read back a user's encrypted key blob.
    ///
    /// A missing blob is [`StoreError::KeyBlobMissing`] so the auth layer
    /// can fold it into its opaque credential failure; any other read
    /// failure is a real storage error.
    pub fn load(&self, username: &str) -> Result<String, StoreError> {
        let username = sanitize_username(username)?;
        match fs::read_to_string(self.paths.key_file(&username)) {
            Ok(pem) => Ok(pem),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::KeyBlobMissing(username))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn store_load_and_overwrite() {
        let dir = tempdir().unwrap();
        let keyring = KeyBlobStore::new(StorePaths::new(dir.path()));

        keyring.store("alice", "blob one").unwrap();
        assert_eq!(keyring.load("alice").unwrap(), "blob one");

        keyring.store("alice", "blob two").unwrap();
        assert_eq!(keyring.load("alice").unwrap(), "blob two");
    }

    #[test]
    fn missing_blob_is_its_own_error() {
        let dir = tempdir().unwrap();
        let keyring = KeyBlobStore::new(StorePaths::new(dir.path()));
        let err = keyring.load("ghost").unwrap_err();
        assert!(matches!(err, StoreError::KeyBlobMissing(name) if name == "ghost"));
    }

    #[test]
    fn usernames_are_normalized() {
        let dir = tempdir().unwrap();
        let keyring = KeyBlobStore::new(StorePaths::new(dir.path()));
        keyring.store("Alice", "blob").unwrap();
        assert_eq!(keyring.load("alice").unwrap(), "blob");
    }
}
