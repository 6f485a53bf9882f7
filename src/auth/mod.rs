//! Authentication: static client token verification and password hashing.

mod extractor;
pub mod password;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

pub use extractor::BearerAuth;

/// Wrapper type for the static API token shared with clients.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
///
/// # Security features
/// - `Debug` prints `[REDACTED]` instead of the actual value
/// - Memory is zeroed when dropped (via `zeroize`)
/// - Explicit `.expose_secret()` required to access the value
#[derive(Clone)]
pub struct ApiToken(SecretString);

impl ApiToken {
    pub fn new(token: String) -> Self {
        Self(SecretString::from(token))
    }

    /// Compare the provided token with the stored one.
    ///
    /// Only equal-length inputs are compared in constant time. A length
    /// mismatch returns false immediately, so the token length is not secret.
    pub fn verify(&self, provided: &str) -> bool {
        let expected = self.0.expose_secret();
        expected.as_bytes().ct_eq(provided.as_bytes()).into()
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiToken([REDACTED])")
    }
}
