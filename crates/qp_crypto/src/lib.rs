//! qp_crypto — Quietpost cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited RustCrypto crates.
//! - Zeroize secret material (derived keys, unwrapped AES keys) on drop.
//! - Encrypt/decrypt failures are opaque at the error surface; the cause
//!   goes to the internal log only, so callers cannot be used as a
//!   padding/tag oracle.
//!
//! # Module layout
//! - `password` — PBKDF2-HMAC-SHA256 password hashing + constant-time verify
//! - `keys`     — RSA-2048 key pairs, SPKI PEM export, encrypted PKCS#8 blobs
//! - `hybrid`   — AES-256-GCM payload encryption with RSA-OAEP key wrap
//! - `error`    — unified error type

pub mod error;
pub mod hybrid;
pub mod keys;
pub mod password;

pub use error::CryptoError;
pub use hybrid::SealedMessage;
pub use keys::RsaKeyPair;
