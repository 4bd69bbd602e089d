//! Encrypted message envelope — the unit the message store persists.
//!
//! The store (and anyone who can read the log file) sees only:
//!   - from_user / to_user   (routing — cannot be avoided)
//!   - timestamp             (sender-claimed, ISO-8601 text)
//!   - encrypted_message     (AES-256-GCM ciphertext + tag, base64)
//!   - encrypted_key         (RSA-OAEP-wrapped AES key, base64)
//!   - nonce                 (96-bit GCM nonce, base64)
//!
//! The plaintext is recoverable only with the recipient's private key.
//! Field names are the on-disk format; do not rename them.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One encrypted message record plus its wrapped symmetric key and nonce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub from_user: String,
    pub to_user: String,
    pub encrypted_message: String,
    pub encrypted_key: String,
    pub nonce: String,
    /// Sender-claimed ISO-8601 timestamp. Log order is arrival order at
    /// the store, never this value.
    pub timestamp: String,
}

impl Envelope {
    /// Check that all six fields are present and non-blank and that the
    /// timestamp parses as ISO-8601 (with or without a UTC offset).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields: [(&'static str, &str); 6] = [
            ("from_user", &self.from_user),
            ("to_user", &self.to_user),
            ("encrypted_message", &self.encrypted_message),
            ("encrypted_key", &self.encrypted_key),
            ("nonce", &self.nonce),
            ("timestamp", &self.timestamp),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(name));
            }
        }

        let ts = self.timestamp.as_str();
        if DateTime::parse_from_rfc3339(ts).is_err() && ts.parse::<NaiveDateTime>().is_err() {
            return Err(ValidationError::BadTimestamp(self.timestamp.clone()));
        }
        Ok(())
    }
}

/// The decrypted view of an envelope that `receive` hands back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlainMessage {
    pub from: String,
    pub text: String,
    pub timestamp: String,
}
