use thiserror::Error;

/// Validation failures carry a specific, user-facing reason — unlike
/// auth and crypto errors, which are flattened on purpose.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username contains path separators or traversal sequences")]
    UnsafeUsername,

    #[error("username contains invalid characters; allowed: letters, numbers, underscore, hyphen")]
    InvalidUsernameChars,

    #[error("envelope field `{0}` must be a non-empty string")]
    EmptyField(&'static str),

    #[error("timestamp is not a valid ISO-8601 string: {0:?}")]
    BadTimestamp(String),
}
