//! Anonymous per-browser identity tokens.
//!
//! A token is 16 random bytes rendered as 32 lowercase hex characters and kept
//! in the `clientid` cookie. It is advisory only: it qualifies the creator of
//! a short URL in the audit log and is never stored server side.

use rand::RngCore;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const CLIENT_ID_BYTES: usize = 16;

static CLIENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{32}$").expect("client id regex is valid"));

/// A validated client identity token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates a fresh token from the thread-local CSPRNG.
pub fn issue() -> ClientId {
    let mut buffer = [0u8; CLIENT_ID_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    ClientId(hex::encode(buffer))
}

/// Accepts `candidate` only if it has the exact token format.
pub fn validate(candidate: &str) -> Option<ClientId> {
    CLIENT_ID_REGEX
        .is_match(candidate)
        .then(|| ClientId(candidate.to_string()))
}

/// Returns the candidate when valid, otherwise a freshly issued token.
///
/// The boolean is `true` when a new token was issued and the caller must
/// send it back to the client.
pub fn issue_or_validate(candidate: Option<&str>) -> (ClientId, bool) {
    match candidate.and_then(validate) {
        Some(id) => (id, false),
        None => (issue(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_issued_token_format() {
        let id = issue();
        assert_eq!(id.as_str().len(), 32);
        assert!(validate(id.as_str()).is_some());
    }

    #[test]
    fn test_issued_tokens_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| issue()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_validate_rejects_bad_candidates() {
        assert!(validate("").is_none());
        assert!(validate("0123456789abcdef0123456789abcde").is_none());
        assert!(validate("0123456789abcdef0123456789abcdef0").is_none());
        assert!(validate("0123456789ABCDEF0123456789ABCDEF").is_none());
        assert!(validate("0123456789abcdef0123456789abcdeg").is_none());
        assert!(validate(" 123456789abcdef0123456789abcdef").is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let candidate = "0123456789abcdef0123456789abcdef";
        assert_eq!(validate(candidate).unwrap().as_str(), candidate);
    }

    #[test]
    fn test_issue_or_validate_keeps_valid_token() {
        let candidate = "ffffffffffffffffffffffffffffffff";
        let (id, fresh) = issue_or_validate(Some(candidate));
        assert_eq!(id.as_str(), candidate);
        assert!(!fresh);
    }

    #[test]
    fn test_issue_or_validate_replaces_invalid_token() {
        let (id, fresh) = issue_or_validate(Some("not-a-token"));
        assert!(fresh);
        assert_ne!(id.as_str(), "not-a-token");

        let (_, fresh) = issue_or_validate(None);
        assert!(fresh);
    }
}
