//! User status handlers.

use actix_web::{HttpResponse, web};

use ripple_core::policy::require_authenticated;
use ripple_shared::dto::{StatusResponse, UpdateStatusRequest};

use crate::middleware::auth::RequestIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /status
pub async fn get_status(
    identity: RequestIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let caller = require_authenticated(&identity)?;

    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        status: user.status,
    }))
}

/// PATCH /status
pub async fn update_status(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let caller = require_authenticated(&identity)?;

    let status = body.into_inner().status;
    if status.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "Status must not be empty".to_string(),
        ]));
    }

    let mut user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.set_status(status.trim().to_string());
    let saved = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        status: saved.status,
    }))
}
