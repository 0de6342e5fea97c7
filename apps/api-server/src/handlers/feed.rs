//! Feed handlers - post CRUD with fan-out notifications.
//!
//! Every mutation follows the same path: gate -> policy -> validation ->
//! (ownership) -> store write -> broadcast -> response. Nothing is written
//! before the checks pass, and the event fires only after the write
//! succeeded.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::{Post, PostEvent};
use ripple_core::policy::{require_authenticated, require_ownership};
use ripple_shared::dto::{FeedPage, FeedQuery, MessageResponse, PostEnvelope, PostInput};

use crate::middleware::auth::RequestIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation;

/// The broadcast is best-effort: a failed emit is logged, never surfaced to
/// the client whose mutation already persisted.
async fn broadcast(state: &AppState, event: PostEvent) {
    if let Err(e) = state.broadcaster.emit(&event).await {
        tracing::warn!(action = event.action(), error = %e, "Failed to broadcast post event");
    }
}

/// GET /posts?page=N
pub async fn get_posts(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    require_authenticated(&identity)?;

    let page = query.page.unwrap_or(1).max(1);
    let posts = state.posts.find_page(page).await?;
    let total_items = state.posts.count().await?;

    Ok(HttpResponse::Ok().json(FeedPage {
        message: "Fetched posts".to_string(),
        posts,
        total_items,
    }))
}

/// POST /post
pub async fn create_post(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let caller = require_authenticated(&identity)?;
    let input = body.into_inner();

    let mut errors = validation::validate_post_input(&input.title, &input.content);
    let image_url = match input.image_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            errors.push("No image provided".to_string());
            String::new()
        }
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = Post::new(
        caller.user_id,
        input.title.trim().to_string(),
        input.content.trim().to_string(),
        image_url,
    );
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, creator_id = %saved.creator_id, "Post created");
    broadcast(&state, PostEvent::Create { post: saved.clone() }).await;

    Ok(HttpResponse::Created().json(PostEnvelope {
        message: "Post created".to_string(),
        post: saved,
    }))
}

/// GET /post/{id}
pub async fn get_post(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_authenticated(&identity)?;

    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Could not find post".to_string()))?;

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: "Post fetched".to_string(),
        post,
    }))
}

/// PUT /post/{id}
pub async fn update_post(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let caller = require_authenticated(&identity)?;
    let input = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Could not find post".to_string()))?;

    require_ownership(caller, post.creator_id)?;

    let errors = validation::validate_post_input(&input.title, &input.content);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    post.apply_edit(
        input.title.trim().to_string(),
        input.content.trim().to_string(),
        input.image_url.filter(|url| !url.trim().is_empty()),
    );
    let saved = state.posts.update(post).await?;

    broadcast(&state, PostEvent::Update { post: saved.clone() }).await;

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: "Post updated".to_string(),
        post: saved,
    }))
}

/// DELETE /post/{id}
pub async fn delete_post(
    identity: RequestIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = require_authenticated(&identity)?;
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Could not find post".to_string()))?;

    require_ownership(caller, post.creator_id)?;

    state.posts.delete(post_id).await?;

    tracing::info!(post_id = %post_id, "Post deleted");
    broadcast(&state, PostEvent::Delete { post: post_id }).await;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}
