//! qp_store — durable, file-backed storage for Quietpost
//!
//! Everything lives as plain files under one storage root:
//!   - `users/<name>.json`    — one user record per registered username
//!   - `keys/<name>.key`      — one password-encrypted private-key blob
//!   - `messages/<name>.json` — one array-of-envelopes log per recipient
//!
//! # Durability model
//! Writers never modify a file in place: they write a complete replacement
//! to a temp file in the same directory, fsync it, and atomically rename
//! it over the target. Readers therefore never lock — they see either the
//! old file or the new one, whole.
//!
//! Writers to the *same* recipient's log are serialized by an advisory
//! `.lock` sidecar with a bounded wait; writers to different recipients
//! run fully in parallel.
//!
//! A corrupted log never fails a read: it is logged and treated as empty.

mod atomic;

pub mod error;
pub mod keyring;
pub mod lock;
pub mod messages;
pub mod paths;
pub mod users;

pub use error::StoreError;
pub use keyring::KeyBlobStore;
pub use messages::MessageStore;
pub use paths::StorePaths;
pub use users::{UserDirectory, UserRecord};
