//! Account handlers - signup and login.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use ripple_core::domain::User;
use ripple_core::ports::{PasswordService, TokenService};
use ripple_shared::dto::{AuthResponse, LoginRequest, SignupRequest, SignupResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    let errors = validation::validate_signup(&email, &req.password, &req.name);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password_service
        .hash(req.password.trim())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(email, password_hash, req.name.trim().to_string());
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, "User created");

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created".to_string(),
        user_id: saved.id,
    }))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::NotAuthenticated)?;

    let valid = password_service
        .verify(req.password.trim(), &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::NotAuthenticated);
    }

    let token = token_service
        .issue(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}
