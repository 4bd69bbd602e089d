//! RSA key custody
//!
//! Each user has one long-term RSA-2048 key pair (public exponent 65537).
//! The public half is exported as SPKI PEM and published in the user
//! record; the private half only ever touches disk as an encrypted
//! PKCS#8 document keyed by the owner's password (PBES2).
//!
//! There is no rotation path: a key pair is generated at registration and
//! lives as long as the account.

use pkcs8::LineEnding;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const RSA_BITS: usize = 2048;

/// Freshly generated key pair. The private half is zeroized on drop by
/// the `rsa` crate itself.
pub struct RsaKeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

/// Generate an RSA-2048 key pair (e = 65537).
pub fn generate() -> Result<RsaKeyPair, CryptoError> {
    let private = RsaPrivateKey::new(&mut rand::rngs::OsRng, RSA_BITS).map_err(|e| {
        tracing::debug!(error = %e, "RSA key generation failed");
        CryptoError::KeyGeneration
    })?;
    let public = RsaPublicKey::from(&private);
    Ok(RsaKeyPair { private, public })
}

/// Export a public key as SPKI PEM, the form stored in user records.
pub fn public_key_pem(public: &RsaPublicKey) -> Result<String, CryptoError> {
    public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|_| CryptoError::InvalidKey("public key failed to serialize".into()))
}

/// Parse a stored SPKI PEM public key.
pub fn parse_public_pem(pem: &str) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|_| CryptoError::InvalidKey("public key is not valid SPKI PEM".into()))
}

/// Serialize a private key as password-encrypted PKCS#8 PEM.
/// This is the only form in which private keys are persisted.
pub fn seal_private_key(
    private: &RsaPrivateKey,
    password: &str,
) -> Result<Zeroizing<String>, CryptoError> {
    private
        .to_pkcs8_encrypted_pem(&mut rand::rngs::OsRng, password.as_bytes(), LineEnding::LF)
        .map_err(|e| {
            tracing::debug!(error = %e, "private key encryption failed");
            CryptoError::Encrypt
        })
}

/// Decrypt a stored private-key blob. A wrong password and a malformed
/// or truncated blob fail identically.
pub fn open_private_key(pem: &str, password: &str) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs8_encrypted_pem(pem, password.as_bytes()).map_err(|e| {
        tracing::debug!(error = %e, "private key blob failed to open");
        CryptoError::CredentialRejected
    })
}
