//! Full-stack scenarios through the public surface.

use qp_messenger::{Messenger, MessengerError};
use qp_proto::Envelope;
use qp_store::StorePaths;
use tempfile::tempdir;

fn messenger() -> (tempfile::TempDir, Messenger) {
    let dir = tempdir().unwrap();
    let messenger = Messenger::new(StorePaths::new(dir.path()));
    (dir, messenger)
}

#[test]
fn alice_sends_bob_reads() {
    let (_dir, messenger) = messenger();

    messenger.register("alice", "password123").unwrap();
    messenger.register("bob", "password456").unwrap();

    let alice = messenger.authenticate("alice", "password123").unwrap();
    messenger.send(&alice, "bob", "hi bob").unwrap();

    let bob = messenger.authenticate("bob", "password456").unwrap();
    let inbox = messenger.receive(&bob).unwrap();

    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].from, "alice");
    assert_eq!(inbox[0].text, "hi bob");

    // the stored envelope is opaque
    let stored = messenger.message_store().fetch("bob").unwrap();
    assert_eq!(stored[0].from_user, "alice");
    assert!(!stored[0].encrypted_message.contains("hi bob"));
}

#[test]
fn registration_does_not_authenticate() {
    let (_dir, messenger) = messenger();
    let record = messenger.register("alice", "password123").unwrap();
    assert_eq!(record.username, "alice");
    // a session only exists after an explicit login
    messenger.authenticate("alice", "password123").unwrap();
}

#[test]
fn auth_failures_are_indistinguishable() {
    let (_dir, messenger) = messenger();
    messenger.register("alice", "password123").unwrap();

    let unknown_user = messenger.authenticate("nobody", "password123").unwrap_err();
    let wrong_password = messenger.authenticate("alice", "password124").unwrap_err();

    assert!(matches!(unknown_user, MessengerError::InvalidCredentials));
    assert!(matches!(wrong_password, MessengerError::InvalidCredentials));
    assert_eq!(unknown_user.to_string(), wrong_password.to_string());
}

#[test]
fn duplicate_registration_rejected_case_insensitively() {
    let (_dir, messenger) = messenger();
    messenger.register("Alice", "password123").unwrap();

    let err = messenger.register("alice", "different-pass").unwrap_err();
    assert!(matches!(err, MessengerError::DuplicateUser(name) if name == "alice"));
}

#[test]
fn short_password_rejected_before_any_crypto() {
    let (_dir, messenger) = messenger();
    let err = messenger.register("alice", "short").unwrap_err();
    assert!(matches!(err, MessengerError::PasswordTooShort));
    assert!(messenger.user_directory().load("alice").unwrap().is_none());
}

#[test]
fn send_to_unknown_recipient_is_specific() {
    let (_dir, messenger) = messenger();
    messenger.register("alice", "password123").unwrap();
    let alice = messenger.authenticate("alice", "password123").unwrap();

    let err = messenger.send(&alice, "ghost", "anyone there?").unwrap_err();
    assert!(matches!(err, MessengerError::UnknownRecipient(name) if name == "ghost"));
}

#[test]
fn unsafe_usernames_rejected_at_every_surface() {
    let (_dir, messenger) = messenger();
    assert!(matches!(
        messenger.register("../etc", "password123"),
        Err(MessengerError::Validation(_))
    ));
    assert!(matches!(
        messenger.authenticate("a/b", "password123"),
        Err(MessengerError::Validation(_))
    ));
}

#[test]
fn undecryptable_envelopes_are_skipped_not_fatal() {
    let (_dir, messenger) = messenger();
    messenger.register("alice", "password123").unwrap();
    messenger.register("bob", "password456").unwrap();

    let alice = messenger.authenticate("alice", "password123").unwrap();
    messenger.send(&alice, "bob", "readable").unwrap();

    // a raw-store writer drops garbage into bob's log
    messenger
        .message_store()
        .append(&Envelope {
            from_user: "mallory".into(),
            to_user: "bob".into(),
            encrypted_message: "bm90IHJlYWwgY2lwaGVydGV4dA==".into(),
            encrypted_key: "bm90IGEgcmVhbCBrZXk=".into(),
            nonce: "AAAAAAAAAAAAAAAA".into(),
            timestamp: "2026-08-29T12:00:00+00:00".into(),
        })
        .unwrap();

    let bob = messenger.authenticate("bob", "password456").unwrap();
    let inbox = messenger.receive(&bob).unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].text, "readable");
}

#[test]
fn failed_key_blob_write_does_not_brick_the_username() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::new(dir.path());
    let messenger = Messenger::new(paths.clone());

    // a directory squatting on the blob path makes the blob write fail
    paths.create_dirs().unwrap();
    std::fs::create_dir(paths.key_file("alice")).unwrap();

    let err = messenger.register("alice", "password123").unwrap_err();
    assert!(matches!(err, MessengerError::Storage(_)));
    // the half-registered record must have been rolled back
    assert!(messenger.user_directory().load("alice").unwrap().is_none());

    // once the obstruction is gone the name is usable again
    std::fs::remove_dir(paths.key_file("alice")).unwrap();
    messenger.register("alice", "password123").unwrap();
    messenger.authenticate("alice", "password123").unwrap();
}

#[test]
fn messages_survive_reopening_the_store() {
    let dir = tempdir().unwrap();
    {
        let messenger = Messenger::new(StorePaths::new(dir.path()));
        messenger.register("alice", "password123").unwrap();
        messenger.register("bob", "password456").unwrap();
        let alice = messenger.authenticate("alice", "password123").unwrap();
        messenger.send(&alice, "bob", "persisted").unwrap();
    }

    let reopened = Messenger::new(StorePaths::new(dir.path()));
    let bob = reopened.authenticate("bob", "password456").unwrap();
    let inbox = reopened.receive(&bob).unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].text, "persisted");
}
