use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessengerError {
    /// Unknown user, wrong password, and an unusable key blob all land
    /// here. The distinction is logged internally and never surfaced, so
    /// a caller cannot enumerate accounts or learn anything about key
    /// custody.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password must be at least 8 characters")]
    PasswordTooShort,

    #[error("username already taken: {0}")]
    DuplicateUser(String),

    /// Recipient usernames are public (the directory is enumerable), so
    /// this one is allowed to be specific.
    #[error("no such user: {0}")]
    UnknownRecipient(String),

    #[error(transparent)]
    Validation(#[from] qp_proto::ValidationError),

    #[error(transparent)]
    Crypto(#[from] qp_crypto::CryptoError),

    #[error(transparent)]
    Storage(#[from] qp_store::StoreError),
}
