//! Password hashing and verification
//!
//! PBKDF2-HMAC-SHA256 with 600 000 iterations — a memory-light,
//! iteration-heavy KDF sized for login-time checks. The derived hash and
//! the random 32-byte salt are both stored base64-encoded in the user
//! record; the raw password is never stored or logged.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
const HASH_LEN: usize = 32;
const SALT_LEN: usize = 32;

/// Derived password hash + the salt that produced it, both base64.
#[derive(Debug, Clone)]
pub struct PasswordRecord {
    pub hash: String,
    pub salt: String,
}

/// Derive a password hash. When `salt` is `None` a fresh random 32-byte
/// salt is generated; pass the stored salt to re-derive for verification.
pub fn derive(password: &str, salt: Option<&str>) -> Result<PasswordRecord, CryptoError> {
    let salt_bytes = match salt {
        Some(encoded) => B64
            .decode(encoded)
            .map_err(|_| CryptoError::InvalidKey("stored salt is not valid base64".into()))?,
        None => {
            let mut bytes = vec![0u8; SALT_LEN];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            bytes
        }
    };

    let mut hash = Zeroizing::new([0u8; HASH_LEN]);
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        &salt_bytes,
        PBKDF2_ITERATIONS,
        hash.as_mut(),
    );

    Ok(PasswordRecord {
        hash: B64.encode(hash.as_ref()),
        salt: B64.encode(&salt_bytes),
    })
}

/// Re-derive with the stored salt and compare in constant time.
/// Undecodable stored values simply verify as false.
pub fn verify(password: &str, stored_hash: &str, stored_salt: &str) -> bool {
    let derived = match derive(password, Some(stored_salt)) {
        Ok(record) => record,
        Err(_) => {
            tracing::debug!("password verify: stored salt failed to decode");
            return false;
        }
    };
    let (Ok(a), Ok(b)) = (B64.decode(&derived.hash), B64.decode(stored_hash)) else {
        tracing::debug!("password verify: stored hash failed to decode");
        return false;
    };
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(&b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_and_verify_roundtrip() {
        let record = derive("correct horse battery staple", None).unwrap();
        assert!(verify("correct horse battery staple", &record.hash, &record.salt));
    }

    #[test]
    fn single_character_variant_fails() {
        let record = derive("password123", None).unwrap();
        assert!(!verify("password124", &record.hash, &record.salt));
        assert!(!verify("Password123", &record.hash, &record.salt));
        assert!(!verify("", &record.hash, &record.salt));
    }

    #[test]
    fn fresh_salt_per_derive() {
        let a = derive("same password", None).unwrap();
        let b = derive("same password", None).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn garbage_stored_values_verify_false() {
        assert!(!verify("pw", "not base64!!", "also not base64!!"));
    }
}
