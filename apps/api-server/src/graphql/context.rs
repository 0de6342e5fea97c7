//! GraphQL request context.

use std::sync::Arc;

use ripple_core::identity::Identity;
use ripple_core::ports::{PasswordService, TokenService};

use crate::state::AppState;

/// Per-request context available to all resolvers.
///
/// Carries the shared application state plus the identity the auth gate
/// resolved for this request; resolvers apply the same access policy as the
/// REST handlers.
pub struct GraphQLContext {
    pub state: AppState,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
    pub identity: Identity,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(
        state: AppState,
        token_service: Arc<dyn TokenService>,
        password_service: Arc<dyn PasswordService>,
        identity: Identity,
    ) -> Self {
        Self {
            state,
            token_service,
            password_service,
            identity,
        }
    }
}
