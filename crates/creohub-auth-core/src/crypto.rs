//! Token generation and hashing
//!
//! Tokens are 32 bytes from the thread-local CSPRNG (seeded from the OS),
//! hex-encoded to a fixed 64-character string. Storage only ever sees the
//! SHA-256 digest.

use rand::RngCore;
use sha2::{Digest, Sha256};

use creohub_types::SessionToken;

/// Random bytes per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Encoded token length
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generate a new session token
pub fn generate_session_token() -> SessionToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    SessionToken::new(hex::encode(bytes))
}

/// Whether a presented token has the shape we issue.
///
/// Lets obviously bogus tokens be rejected without a storage round trip.
#[inline]
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Securely hash a token for storage.
///
/// Uses SHA-256 to create a one-way hash of the token.
/// The original token cannot be recovered from the hash.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_shape() {
        let token = generate_session_token();
        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(is_well_formed_token(token.as_str()));
    }

    #[test]
    fn test_tokens_differ() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(!is_well_formed_token(""));
        assert!(!is_well_formed_token("abc"));
        // Uppercase hex is not what we issue
        assert!(!is_well_formed_token(&"A".repeat(TOKEN_LENGTH)));
        assert!(!is_well_formed_token(&"g".repeat(TOKEN_LENGTH)));
        assert!(is_well_formed_token(&"0".repeat(TOKEN_LENGTH)));
    }

    #[test]
    fn test_hash_token() {
        let token = "session_token_value";
        let hash1 = hash_token(token);
        let hash2 = hash_token(token);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 = 32 bytes = 64 hex chars

        let hash3 = hash_token("different_token");
        assert_ne!(hash1, hash3);
    }
}
