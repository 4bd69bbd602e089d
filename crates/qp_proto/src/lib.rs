//! qp_proto — Quietpost wire types and validation
//!
//! Everything persisted or handed across the component boundary is JSON.
//! The envelope field names are the storage format — renaming one is a
//! breaking change for every log already on disk.
//!
//! # Modules
//! - `envelope` — the encrypted message envelope + the decrypted view
//! - `username` — username sanitation (the only thing that may become a
//!   file name)
//! - `error`    — validation errors, the one deliberately specific error
//!   class in the system

pub mod envelope;
pub mod error;
pub mod username;

pub use envelope::{Envelope, PlainMessage};
pub use error::ValidationError;
pub use username::sanitize_username;
