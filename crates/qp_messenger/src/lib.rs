//! qp_messenger — the Quietpost core surface
//!
//! End-to-end encrypted point-to-point messaging between registered
//! users, each identified by a username bound to an RSA key pair. This
//! crate wires the leaf crates together:
//!
//! - registration: password hash (qp_crypto::password) + key pair
//!   (qp_crypto::keys) + user record (qp_store::users) + sealed private
//!   key blob (qp_store::keyring)
//! - login: verify the hash, unlock the blob, hold the key in a
//!   [`Session`] for the lifetime of the interaction
//! - send: resolve the recipient's public key, hybrid-encrypt
//!   (qp_crypto::hybrid), append the envelope (qp_store::messages)
//! - receive: fetch the caller's log and decrypt with the session key
//!
//! Anything above this — menus, HTTP adapters, session maps — is an
//! embedder concern. An adapter that holds sessions for concurrent
//! callers must protect that map itself; the core assumes one caller per
//! session.

pub mod error;
pub mod messenger;
pub mod session;

pub use error::MessengerError;
pub use messenger::Messenger;
pub use session::Session;
