//! PKCE (Proof Key for Code Exchange) for the login flow
//!
//! RFC 7636 with the S256 method. The verifier and CSRF state are 32 random
//! bytes each, base64url-encoded without padding (43 characters).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a URL-safe random token of 32 bytes.
fn random_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// `BASE64URL(SHA256(ASCII(code_verifier)))`
pub fn code_challenge_for(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Verifier, challenge and CSRF state for one login attempt
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Kept server-side until the token exchange.
    pub code_verifier: String,
    /// Sent in the authorization request.
    pub code_challenge: String,
    /// Must come back unchanged on the callback.
    pub state: String,
}

impl PkceChallenge {
    pub fn generate() -> Self {
        let code_verifier = random_token();
        let code_challenge = code_challenge_for(&code_verifier);
        Self { code_verifier, code_challenge, state: random_token() }
    }

    #[must_use]
    pub const fn challenge_method(&self) -> &'static str {
        "S256"
    }
}
