use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed")]
    KeyGeneration,

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    /// Wrong password, or a blob that is missing pieces or was tampered
    /// with — deliberately indistinguishable at this surface.
    #[error("Credentials rejected")]
    CredentialRejected,

    #[error("Encryption failed")]
    Encrypt,

    /// Covers tag mismatch, wrong key, and malformed encoding alike.
    #[error("Decryption failed")]
    Decrypt,
}
