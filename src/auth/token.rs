// src/auth/token.rs
use base64::Engine;
use std::fmt;

/// Username plus application secret. Both halves are required; a provider
/// with no credentials simply never produces a token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build the Basic authorization token: `base64(username:secret)`.
    /// Deterministic, so the same pair always yields the same header.
    pub fn token(&self) -> AuthToken {
        let raw = format!("{}:{}", self.username, self.secret);
        AuthToken(base64::engine::general_purpose::STANDARD.encode(raw.as_bytes()))
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Opaque token carried in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
