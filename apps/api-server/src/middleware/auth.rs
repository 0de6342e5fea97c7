//! The auth gate - identity extraction that never rejects.
//!
//! Every request gets a fresh [`Identity`]. A missing header, an unparseable
//! header or a failing token all collapse to `Anonymous`; whether that is
//! acceptable is decided per operation by `ripple_core::policy`, so a 401
//! can only ever originate from a handler or resolver.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use ripple_core::identity::{AnonymousReason, AuthenticatedUser, Identity};
use ripple_core::ports::TokenService;

/// Request identity extractor.
///
/// Use this in handlers that need to know who is calling:
/// ```ignore
/// async fn create_post(identity: RequestIdentity, ...) -> AppResult<HttpResponse> {
///     let user = require_authenticated(&identity)?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestIdentity(pub Identity);

impl std::ops::Deref for RequestIdentity {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for RequestIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(RequestIdentity(resolve_identity(req))))
    }
}

fn resolve_identity(req: &HttpRequest) -> Identity {
    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Identity::Anonymous(AnonymousReason::VerificationFailed);
    };

    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Identity::Anonymous(AnonymousReason::MissingHeader);
    };

    let Ok(auth_str) = auth_header.to_str() else {
        return Identity::Anonymous(AnonymousReason::MalformedHeader);
    };

    // "Bearer <token>" - the token is whatever follows the scheme word.
    let mut parts = auth_str.split_whitespace();
    let _scheme = parts.next();
    let Some(token) = parts.next() else {
        return Identity::Anonymous(AnonymousReason::MalformedHeader);
    };

    match token_service.verify(token) {
        Ok(claims) => Identity::Authenticated(AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.email,
        }),
        Err(e) => {
            // Swallowed on purpose; the request proceeds unauthenticated.
            tracing::debug!(error = %e, "Token verification failed, continuing as anonymous");
            Identity::Anonymous(AnonymousReason::VerificationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use ripple_core::ports::{AuthError, TokenClaims};
    use uuid::Uuid;

    /// Token service stub: accepts exactly one token string.
    struct StubTokenService {
        valid_token: String,
        user_id: Uuid,
        failure: AuthError,
    }

    impl StubTokenService {
        fn accepting(token: &str, user_id: Uuid) -> Self {
            Self {
                valid_token: token.to_string(),
                user_id,
                failure: AuthError::InvalidToken,
            }
        }

        fn failing_with(failure: AuthError) -> Self {
            Self {
                valid_token: String::new(),
                user_id: Uuid::nil(),
                failure,
            }
        }
    }

    impl TokenService for StubTokenService {
        fn issue(&self, _user_id: Uuid, _email: &str) -> Result<String, AuthError> {
            Ok(self.valid_token.clone())
        }

        fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
            if !self.valid_token.is_empty() && token == self.valid_token {
                Ok(TokenClaims {
                    user_id: self.user_id,
                    email: "user@example.com".to_string(),
                    issued_at: 0,
                    expires_at: i64::MAX,
                })
            } else {
                Err(match &self.failure {
                    AuthError::Expired => AuthError::Expired,
                    _ => AuthError::InvalidToken,
                })
            }
        }
    }

    fn gate(service: StubTokenService, request: TestRequest) -> Identity {
        let service: Arc<dyn TokenService> = Arc::new(service);
        let req = request.app_data(web::Data::new(service)).to_http_request();
        resolve_identity(&req)
    }

    #[test]
    fn missing_header_is_anonymous() {
        let identity = gate(
            StubTokenService::accepting("tok", Uuid::new_v4()),
            TestRequest::default(),
        );
        assert!(matches!(
            identity,
            Identity::Anonymous(AnonymousReason::MissingHeader)
        ));
    }

    #[test]
    fn scheme_without_token_is_anonymous() {
        let identity = gate(
            StubTokenService::accepting("tok", Uuid::new_v4()),
            TestRequest::default().insert_header(("Authorization", "Bearer")),
        );
        assert!(matches!(
            identity,
            Identity::Anonymous(AnonymousReason::MalformedHeader)
        ));
    }

    #[test]
    fn failing_verification_is_anonymous_not_an_error() {
        for failure in [
            AuthError::Expired,
            AuthError::InvalidToken,
            AuthError::Malformed("junk".to_string()),
        ] {
            let identity = gate(
                StubTokenService::failing_with(failure),
                TestRequest::default().insert_header(("Authorization", "Bearer whatever")),
            );
            assert!(matches!(
                identity,
                Identity::Anonymous(AnonymousReason::VerificationFailed)
            ));
        }
    }

    #[test]
    fn valid_token_authenticates_the_caller() {
        let user_id = Uuid::new_v4();
        let identity = gate(
            StubTokenService::accepting("good-token", user_id),
            TestRequest::default().insert_header(("Authorization", "Bearer good-token")),
        );
        assert!(identity.is_authenticated());
        match identity {
            Identity::Authenticated(user) => assert_eq!(user.user_id, user_id),
            other => panic!("expected authenticated identity, got {other:?}"),
        }
    }
}
