//! Authentication ports.

use uuid::Uuid;

/// Claims carried by an identity token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    /// Unix timestamp the token was issued at.
    pub issued_at: i64,
    /// Unix timestamp the token stops being valid at.
    pub expires_at: i64,
}

/// Token service - issues and verifies signed, time-limited identity tokens.
///
/// Issuance is a pure function of the signing key, the claims and the clock;
/// tokens are not revocable before expiry.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user.
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Verify a token and decode its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature rejected")]
    InvalidToken,

    #[error("Token could not be parsed: {0}")]
    Malformed(String),

    #[error("Token could not be issued: {0}")]
    Issue(String),

    #[error("Hashing error: {0}")]
    Hashing(String),
}
