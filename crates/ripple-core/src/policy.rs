//! Access control policy.
//!
//! The auth gate never rejects a request; these checks are what handlers and
//! resolvers call to turn the request identity into an allow/deny decision.

use thiserror::Error;
use uuid::Uuid;

use crate::identity::{AuthenticatedUser, Identity};

/// Outcome of a denied policy check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not authorized")]
    Forbidden,
}

/// Require an authenticated caller. Invoked at the top of every mutating or
/// privacy-sensitive operation.
pub fn require_authenticated(identity: &Identity) -> Result<&AuthenticatedUser, PolicyError> {
    match identity {
        Identity::Authenticated(user) => Ok(user),
        Identity::Anonymous(_) => Err(PolicyError::NotAuthenticated),
    }
}

/// Require that the caller is the recorded creator of a resource.
pub fn require_ownership(user: &AuthenticatedUser, creator_id: Uuid) -> Result<(), PolicyError> {
    if user.user_id == creator_id {
        Ok(())
    } else {
        Err(PolicyError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AnonymousReason;

    fn authed(user_id: Uuid) -> Identity {
        Identity::Authenticated(AuthenticatedUser {
            user_id,
            email: "user@example.com".to_string(),
        })
    }

    #[test]
    fn anonymous_identity_is_rejected() {
        for reason in [
            AnonymousReason::MissingHeader,
            AnonymousReason::MalformedHeader,
            AnonymousReason::VerificationFailed,
        ] {
            let identity = Identity::Anonymous(reason);
            let result = require_authenticated(&identity);
            assert_eq!(result.unwrap_err(), PolicyError::NotAuthenticated);
        }
    }

    #[test]
    fn authenticated_identity_passes_through() {
        let id = Uuid::new_v4();
        let identity = authed(id);
        let user = require_authenticated(&identity).unwrap();
        assert_eq!(user.user_id, id);
    }

    #[test]
    fn creator_owns_their_resource() {
        let id = Uuid::new_v4();
        let identity = authed(id);
        let user = require_authenticated(&identity).unwrap();
        assert!(require_ownership(user, id).is_ok());
    }

    #[test]
    fn other_users_are_forbidden() {
        let identity = authed(Uuid::new_v4());
        let user = require_authenticated(&identity).unwrap();
        let result = require_ownership(user, Uuid::new_v4());
        assert_eq!(result.unwrap_err(), PolicyError::Forbidden);
    }
}
