//! Register / authenticate / send / receive.

use chrono::Utc;

use qp_crypto::{hybrid, keys, password, CryptoError, SealedMessage};
use qp_proto::{sanitize_username, Envelope, PlainMessage};
use qp_store::{KeyBlobStore, MessageStore, StoreError, StorePaths, UserDirectory, UserRecord};

use crate::error::MessengerError;
use crate::session::Session;

/// Enforced at registration; the KDF itself accepts anything non-empty.
pub const MIN_PASSWORD_LEN: usize = 8;

/// The messaging core. Cheap to clone; all state is on disk.
#[derive(Debug, Clone)]
pub struct Messenger {
    users: UserDirectory,
    keyring: KeyBlobStore,
    messages: MessageStore,
}

impl Messenger {
    pub fn new(paths: StorePaths) -> Self {
        Self {
            users: UserDirectory::new(paths.clone()),
            keyring: KeyBlobStore::new(paths.clone()),
            messages: MessageStore::new(paths),
        }
    }

    /// Open against the OS data directory.
    pub fn open_default() -> Result<Self, MessengerError> {
        Ok(Self::new(StorePaths::default_root()?))
    }

    /// Create an account: derive the password hash, generate the RSA key
    /// pair, seal the private key under the password, persist record and
    /// blob. Does NOT authenticate — call [`Messenger::authenticate`]
    /// afterwards.
    ///
    /// The login password doubles as the key-blob password: a future
    /// password-change feature must re-seal the blob in the same step.
    pub fn register(&self, username: &str, pass: &str) -> Result<UserRecord, MessengerError> {
        let username = sanitize_username(username)?;
        if pass.len() < MIN_PASSWORD_LEN {
            return Err(MessengerError::PasswordTooShort);
        }

        let derived = password::derive(pass, None)?;
        let pair = keys::generate()?;
        let record = UserRecord {
            username: username.clone(),
            password_hash: derived.hash,
            salt: derived.salt,
            public_key: keys::public_key_pem(&pair.public)?,
        };
        let sealed = keys::seal_private_key(&pair.private, pass)?;

        // Record first: the directory's no-clobber write is the atomic
        // claim on the name, so a losing racer fails here before it can
        // touch the existing user's key blob.
        match self.users.register(&record) {
            Ok(()) => {}
            Err(StoreError::DuplicateUser(name)) => {
                return Err(MessengerError::DuplicateUser(name))
            }
            Err(e) => return Err(e.into()),
        }

        // If the blob cannot be persisted the record must not survive,
        // or the name would be stuck: unregisterable and unloginable.
        if let Err(e) = self.keyring.store(&username, &sealed) {
            if let Err(cleanup) = self.users.remove(&username) {
                tracing::warn!(
                    %username,
                    error = %cleanup,
                    "failed to roll back record after key blob write error"
                );
            }
            return Err(e.into());
        }
        Ok(record)
    }

    /// Verify the password and unlock the private key.
    ///
    /// All credential failures collapse into one opaque error; which one
    /// actually happened is visible only in the internal log.
    pub fn authenticate(&self, username: &str, pass: &str) -> Result<Session, MessengerError> {
        let username = sanitize_username(username)?;

        let Some(record) = self.users.load(&username)? else {
            tracing::debug!(%username, "login rejected: unknown user");
            return Err(MessengerError::InvalidCredentials);
        };
        if !password::verify(pass, &record.password_hash, &record.salt) {
            tracing::debug!(%username, "login rejected: password mismatch");
            return Err(MessengerError::InvalidCredentials);
        }

        let blob = match self.keyring.load(&username) {
            Ok(blob) => blob,
            Err(StoreError::KeyBlobMissing(_)) => {
                tracing::debug!(%username, "login rejected: key blob missing");
                return Err(MessengerError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };
        let private_key = match keys::open_private_key(&blob, pass) {
            Ok(key) => key,
            Err(CryptoError::CredentialRejected) => {
                tracing::debug!(%username, "login rejected: key blob failed to open");
                return Err(MessengerError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Session::new(username, private_key, record.public_key))
    }

    /// Encrypt `plaintext` for `recipient` and append it to their log.
    pub fn send(
        &self,
        session: &Session,
        recipient: &str,
        plaintext: &str,
    ) -> Result<(), MessengerError> {
        let recipient = sanitize_username(recipient)?;
        let Some(pem) = self.users.lookup_public_key(&recipient)? else {
            return Err(MessengerError::UnknownRecipient(recipient));
        };
        let public = keys::parse_public_pem(&pem)?;
        let sealed = hybrid::encrypt(plaintext, &public)?;

        self.messages.append(&Envelope {
            from_user: session.username().to_string(),
            to_user: recipient,
            encrypted_message: sealed.ciphertext,
            encrypted_key: sealed.wrapped_key,
            nonce: sealed.nonce,
            timestamp: Utc::now().to_rfc3339(),
        })?;
        Ok(())
    }

    /// Fetch and decrypt the caller's log, in arrival order.
    ///
    /// Envelopes that fail to decrypt (tampered, or mis-addressed by a
    /// raw-store writer) are skipped and logged, never fatal.
    pub fn receive(&self, session: &Session) -> Result<Vec<PlainMessage>, MessengerError> {
        let envelopes = self.messages.fetch(session.username())?;
        let mut out = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            let sealed = SealedMessage {
                ciphertext: envelope.encrypted_message,
                wrapped_key: envelope.encrypted_key,
                nonce: envelope.nonce,
            };
            match hybrid::decrypt(&sealed, session.private_key()) {
                Ok(text) => out.push(PlainMessage {
                    from: envelope.from_user,
                    text,
                    timestamp: envelope.timestamp,
                }),
                Err(_) => {
                    tracing::warn!(
                        recipient = session.username(),
                        from = %envelope.from_user,
                        "skipping envelope that failed to decrypt"
                    );
                }
            }
        }
        Ok(out)
    }

    /// Raw store access for adapters. Note that `MessageStore::fetch`
    /// is not bound to a session: bodies stay confidential, but sender
    /// names and timestamps are visible to anyone who can name a
    /// recipient.
    pub fn message_store(&self) -> &MessageStore {
        &self.messages
    }

    pub fn user_directory(&self) -> &UserDirectory {
        &self.users
    }
}
