//! Username sanitation
//!
//! Usernames become file names under the storage root, so they are held
//! to a filesystem-safe character class and case-folded before any path
//! is built from them. Every component that touches a username-derived
//! path goes through [`sanitize_username`] — there is no other way to
//! turn a username into a path segment.

use crate::error::ValidationError;

/// Validate a username and return its canonical (lowercased) form.
///
/// Rejects empty input, path separators, traversal sequences, and any
/// character outside `[A-Za-z0-9_-]`.
pub fn sanitize_username(username: &str) -> Result<String, ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if username.contains('/') || username.contains('\\') || username.contains("..") {
        return Err(ValidationError::UnsafeUsername);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidUsernameChars);
    }
    Ok(username.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes() {
        assert_eq!(sanitize_username("Alice-1").unwrap(), "alice-1");
        assert_eq!(sanitize_username("bob_42").unwrap(), "bob_42");
    }

    #[test]
    fn rejects_traversal_and_separators() {
        assert_eq!(sanitize_username("../etc"), Err(ValidationError::UnsafeUsername));
        assert_eq!(sanitize_username("a/b"), Err(ValidationError::UnsafeUsername));
        assert_eq!(sanitize_username("a\\b"), Err(ValidationError::UnsafeUsername));
    }

    #[test]
    fn rejects_empty_and_odd_characters() {
        assert_eq!(sanitize_username(""), Err(ValidationError::EmptyUsername));
        assert_eq!(sanitize_username("al ice"), Err(ValidationError::InvalidUsernameChars));
        assert_eq!(sanitize_username("alice!"), Err(ValidationError::InvalidUsernameChars));
        assert_eq!(sanitize_username("ålice"), Err(ValidationError::InvalidUsernameChars));
    }
}
