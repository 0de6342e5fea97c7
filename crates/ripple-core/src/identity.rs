//! Per-request identity produced by the auth gate.

use uuid::Uuid;

/// Why a request ended up without an authenticated identity.
///
/// The gate never reports these to the client; they exist so the failure can
/// be logged while the request proceeds as anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousReason {
    /// No `Authorization` header was sent.
    MissingHeader,
    /// The header was present but no token could be extracted from it.
    MalformedHeader,
    /// A token was extracted but did not verify (bad signature, expired,
    /// unparseable).
    VerificationFailed,
}

/// The caller behind an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Tagged outcome of the auth gate, created fresh for every request and
/// discarded with it.
///
/// The gate always succeeds; whether anonymous access is acceptable is
/// decided per operation by [`crate::policy`].
#[derive(Debug, Clone)]
pub enum Identity {
    Authenticated(AuthenticatedUser),
    Anonymous(AnonymousReason),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Identity::Authenticated(user) => Some(user.user_id),
            Identity::Anonymous(_) => None,
        }
    }
}
