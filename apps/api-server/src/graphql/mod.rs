//! GraphQL endpoint.

pub mod context;
pub mod schema;


use std::sync::Arc;

use actix_web::{HttpResponse, http::StatusCode, web};
use juniper::http::GraphQLRequest;
use juniper::http::graphiql::graphiql_source;

use ripple_core::ports::{PasswordService, TokenService};

use crate::middleware::auth::RequestIdentity;
use crate::state::AppState;
pub use context::GraphQLContext;
pub use schema::{Schema, create_schema};

/// Configure the GraphQL routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .route(web::post().to(graphql_handler))
            .route(web::get().to(graphiql)),
    );
}

/// POST /graphql
async fn graphql_handler(
    schema: web::Data<Schema>,
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    identity: RequestIdentity,
    request: web::Json<GraphQLRequest>,
) -> HttpResponse {
    let ctx = GraphQLContext::new(
        state.get_ref().clone(),
        token_service.get_ref().clone(),
        password_service.get_ref().clone(),
        identity.0,
    );

    let response = request.execute(schema.get_ref(), &ctx).await;
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    HttpResponse::build(status).json(response)
}

/// GET /graphql - interactive playground.
async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(graphiql_source("/graphql", None))
}
