//! An authenticated session: the one place an unlocked private key lives.
//!
//! Sessions are never persisted. The key is decrypted at login, held in
//! memory for the interaction, and zeroized when the session drops (the
//! `rsa` crate zeroizes private-key material on drop). There is no expiry
//! timer here — session lifetime is bound to the surrounding interaction,
//! which is the embedder's responsibility.

use rsa::RsaPrivateKey;

/// Ephemeral `{username, unlocked private key, public key}` tuple.
pub struct Session {
    username: String,
    private_key: RsaPrivateKey,
    public_key_pem: String,
}

impl Session {
    pub(crate) fn new(username: String, private_key: RsaPrivateKey, public_key_pem: String) -> Self {
        Self {
            username,
            private_key,
            public_key_pem,
        }
    }

    /// Canonical (lowercased) username this session authenticated as.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Consume the session, dropping the unlocked key material.
    pub fn logout(self) {}
}

impl std::fmt::Debug for Session {
    // never print key material
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
