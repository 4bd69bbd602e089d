//! User directory — one JSON document per registered username.
//!
//! Records are immutable after registration: no update, no rotation, no
//! delete. Duplicate checks run against the case-normalized name, so
//! `Alice` and `alice` are the same account.

use std::collections::BTreeSet;
use std::fs;

use serde::{Deserialize, Serialize};

use qp_proto::sanitize_username;

use crate::atomic;
use crate::error::StoreError;
use crate::paths::StorePaths;

/// Everything the system knows about a user. The password is represented
/// only by its PBKDF2 hash and salt; the public key is SPKI PEM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub struct UserDirectory {
    paths: StorePaths,
}

impl UserDirectory {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Persist a new user record. The record's username must already be
    /// in canonical form; registration fails if the name is taken.
    pub fn register(&self, record: &UserRecord) -> Result<(), StoreError> {
        let username = sanitize_username(&record.username)?;
        self.paths.create_dirs()?;

        let path = self.paths.user_file(&username);
        // fast path only; the no-clobber rename below is the real check
        if path.exists() {
            return Err(StoreError::DuplicateUser(username));
        }
        let mut canonical = record.clone();
        canonical.username = username.clone();
        match atomic::create_json(&path, &canonical) {
            Ok(()) => Ok(()),
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::DuplicateUser(username))
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a record. Only used to roll back a registration whose key
    /// blob failed to persist; records are otherwise immutable.
    pub fn remove(&self, username: &str) -> Result<(), StoreError> {
        let username = sanitize_username(username)?;
        match fs::remove_file(self.paths.user_file(&username)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a username to its stored public key. Unknown users and
    /// unreadable records both come back as `None`; a corrupted record
    /// is logged for operators but never surfaced to the caller.
    pub fn lookup_public_key(&self, username: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load(username)?.map(|record| record.public_key))
    }

    /// Load a full user record, `None` if absent or corrupted.
    pub fn load(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let username = sanitize_username(username)?;
        let path = self.paths.user_file(&username);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&data) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(%username, error = %e, "user record corrupted; treating as absent");
                Ok(None)
            }
        }
    }

    /// Every registered username, from enumerating `users/*.json`.
    pub fn list_usernames(&self) -> Result<BTreeSet<String>, StoreError> {
        let dir = self.paths.users_dir();
        if !dir.exists() {
            return Ok(BTreeSet::new());
        }
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names)
    }
}
