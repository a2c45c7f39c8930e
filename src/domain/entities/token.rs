use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Opaque session token carried in the session cookie.
///
/// 32 random bytes, base64url encoded. The token is the only key into the
/// session store, so it must be unguessable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::rng().random();
        Self(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates the correlation nonce binding a login initiation to its callback.
///
/// 16 random bytes (128 bits) base64url encoded, single-use.
#[must_use]
pub fn generate_login_state() -> String {
    let random_bytes: [u8; 16] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_length() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), 43);
    }

    #[test]
    fn test_session_token_url_safe() {
        let token = SessionToken::generate();
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token should be URL-safe: {}",
            token
        );
    }

    #[test]
    fn test_session_token_uniqueness() {
        let t1 = SessionToken::generate();
        let t2 = SessionToken::generate();
        assert_ne!(t1, t2, "tokens should be unique");
    }

    #[test]
    fn test_login_state_length() {
        let state = generate_login_state();
        assert_eq!(state.len(), 22);
    }

    #[test]
    fn test_login_state_uniqueness() {
        let s1 = generate_login_state();
        let s2 = generate_login_state();
        assert_ne!(s1, s2, "states should be unique");
    }

    #[test]
    fn test_session_token_round_trips_through_string() {
        let token = SessionToken::generate();
        let parsed = SessionToken::from(token.to_string());
        assert_eq!(token, parsed);
    }
}
