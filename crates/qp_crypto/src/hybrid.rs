//! Hybrid message encryption
//!
//! Payloads are encrypted under a fresh 256-bit AES-GCM key with a fresh
//! 96-bit nonce; the AES key is then wrapped with RSA-OAEP (SHA-256 as
//! both digest and MGF1 hash) under the recipient's public key. Because
//! the symmetric key is single-use, nonce reuse cannot occur.
//!
//! All three outputs travel base64-encoded inside the envelope:
//!   ciphertext (+ GCM tag) | wrapped key | nonce
//!
//! Failure surface is deliberately flat: `Encrypt` and `Decrypt` carry no
//! cause. Whether a decrypt failed on encoding, key unwrap, or tag check
//! is logged internally and nowhere else.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;

const AES_KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// The three encrypted fields of an envelope, base64-encoded.
#[derive(Debug, Clone)]
pub struct SealedMessage {
    pub ciphertext: String,
    pub wrapped_key: String,
    pub nonce: String,
}

/// Encrypt `plaintext` for the holder of `recipient`'s private key.
pub fn encrypt(plaintext: &str, recipient: &RsaPublicKey) -> Result<SealedMessage, CryptoError> {
    let key = Aes256Gcm::generate_key(&mut AeadOsRng);
    let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);

    let cipher = Aes256Gcm::new(&key);
    let ciphertext = cipher.encrypt(&nonce, plaintext.as_bytes()).map_err(|_| {
        tracing::debug!("AEAD encryption failed");
        CryptoError::Encrypt
    })?;

    let wrapped_key = recipient
        .encrypt(&mut rand::rngs::OsRng, Oaep::new::<Sha256>(), key.as_slice())
        .map_err(|e| {
            tracing::debug!(error = %e, "OAEP key wrap failed");
            CryptoError::Encrypt
        })?;

    Ok(SealedMessage {
        ciphertext: B64.encode(&ciphertext),
        wrapped_key: B64.encode(&wrapped_key),
        nonce: B64.encode(nonce),
    })
}

/// Decrypt a sealed message with our own private key.
///
/// Tag mismatch, wrong key, and malformed encoding all fail identically
/// with [`CryptoError::Decrypt`].
pub fn decrypt(sealed: &SealedMessage, own: &RsaPrivateKey) -> Result<String, CryptoError> {
    let wrapped = B64.decode(&sealed.wrapped_key).map_err(|_| decrypt_failure("wrapped key base64"))?;
    let ciphertext = B64.decode(&sealed.ciphertext).map_err(|_| decrypt_failure("ciphertext base64"))?;
    let nonce_bytes = B64.decode(&sealed.nonce).map_err(|_| decrypt_failure("nonce base64"))?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(decrypt_failure("nonce length"));
    }

    let key = Zeroizing::new(
        own.decrypt(Oaep::new::<Sha256>(), &wrapped)
            .map_err(|_| decrypt_failure("OAEP unwrap"))?,
    );
    if key.len() != AES_KEY_LEN {
        return Err(decrypt_failure("unwrapped key length"));
    }

    let cipher =
        Aes256Gcm::new_from_slice(&key).map_err(|_| decrypt_failure("AES key rejected"))?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
        .map_err(|_| decrypt_failure("AEAD open"))?;

    String::from_utf8(plaintext).map_err(|_| decrypt_failure("plaintext not UTF-8"))
}

fn decrypt_failure(stage: &str) -> CryptoError {
    tracing::debug!(stage, "message decryption failed");
    CryptoError::Decrypt
}
