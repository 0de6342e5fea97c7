//! GraphQL schema definition.
//!
//! Resolver errors carry a `code` (HTTP-style status) and, for validation
//! failures, a `data` list in their extensions; the original failure is
//! logged server-side.

use chrono::{DateTime, Utc};
use juniper::{EmptySubscription, FieldError, FieldResult, RootNode, Value};
use uuid::Uuid;

use ripple_core::domain::{Post, PostEvent, User};
use ripple_core::error::RepoError;
use ripple_core::policy::{PolicyError, require_authenticated, require_ownership};

use super::context::GraphQLContext;
use crate::validation;

// =========================================================================
// GraphQL types
// =========================================================================

/// A feed post.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct PostData {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator_id: post.creator_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct UserData {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub status: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            status: user.status,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct AuthPayload {
    pub token: String,
    pub user_id: Uuid,
}

/// One feed page plus the total post count.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct PostPage {
    pub posts: Vec<PostData>,
    pub total_items: i32,
}

#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

// =========================================================================
// Error helpers
// =========================================================================

fn error_with_code(code: i32, message: impl Into<String>) -> FieldError {
    let mut extensions = juniper::Object::with_capacity(1);
    extensions.add_field("code", Value::scalar(code));
    FieldError::new(message.into(), Value::Object(extensions))
}

fn validation_error(details: Vec<String>) -> FieldError {
    let mut extensions = juniper::Object::with_capacity(2);
    extensions.add_field("code", Value::scalar(422));
    extensions.add_field(
        "data",
        Value::list(details.into_iter().map(Value::scalar).collect()),
    );
    FieldError::new("Validation failed", Value::Object(extensions))
}

fn repo_error(e: RepoError) -> FieldError {
    tracing::error!(error = %e, "Repository failure in resolver");
    error_with_code(500, "Internal server error")
}

fn policy_error(e: PolicyError) -> FieldError {
    match e {
        PolicyError::NotAuthenticated => error_with_code(401, "Not authenticated"),
        PolicyError::Forbidden => error_with_code(403, "Not authorized"),
    }
}

async fn broadcast(ctx: &GraphQLContext, event: PostEvent) {
    if let Err(e) = ctx.state.broadcaster.emit(&event).await {
        tracing::warn!(action = event.action(), error = %e, "Failed to broadcast post event");
    }
}

// =========================================================================
// Query root
// =========================================================================

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Paginated feed, two posts per page, newest first.
    async fn get_posts(ctx: &GraphQLContext, page: Option<i32>) -> FieldResult<PostPage> {
        require_authenticated(&ctx.identity).map_err(policy_error)?;

        let page = page.unwrap_or(1).max(1) as u64;
        let posts = ctx.state.posts.find_page(page).await.map_err(repo_error)?;
        let total = ctx.state.posts.count().await.map_err(repo_error)?;

        Ok(PostPage {
            posts: posts.into_iter().map(PostData::from).collect(),
            total_items: total as i32,
        })
    }

    /// A single post by id.
    async fn get_post_by_id(ctx: &GraphQLContext, id: Uuid) -> FieldResult<PostData> {
        require_authenticated(&ctx.identity).map_err(policy_error)?;

        let post = ctx
            .state
            .posts
            .find_by_id(id)
            .await
            .map_err(repo_error)?
            .ok_or_else(|| error_with_code(404, "Could not find post"))?;

        Ok(post.into())
    }
}

// =========================================================================
// Mutation root
// =========================================================================

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Create a new account.
    async fn create_user(ctx: &GraphQLContext, user_input: UserInput) -> FieldResult<UserData> {
        let email = user_input.email.trim().to_lowercase();

        let errors = validation::validate_signup(&email, &user_input.password, &user_input.name);
        if !errors.is_empty() {
            return Err(validation_error(errors));
        }

        if ctx
            .state
            .users
            .find_by_email(&email)
            .await
            .map_err(repo_error)?
            .is_some()
        {
            return Err(error_with_code(409, "User already exists"));
        }

        let password_hash = ctx
            .password_service
            .hash(user_input.password.trim())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                error_with_code(500, "Internal server error")
            })?;

        let user = User::new(email, password_hash, user_input.name.trim().to_string());
        let saved = ctx.state.users.insert(user).await.map_err(repo_error)?;

        Ok(saved.into())
    }

    /// Exchange credentials for a bearer token.
    async fn login(ctx: &GraphQLContext, email: String, password: String) -> FieldResult<AuthPayload> {
        let email = email.trim().to_lowercase();

        let user = ctx
            .state
            .users
            .find_by_email(&email)
            .await
            .map_err(repo_error)?
            .ok_or_else(|| error_with_code(401, "User with this email not found"))?;

        let valid = ctx
            .password_service
            .verify(password.trim(), &user.password_hash)
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification failed");
                error_with_code(500, "Internal server error")
            })?;

        if !valid {
            return Err(error_with_code(401, "Incorrect password"));
        }

        let token = ctx.token_service.issue(user.id, &user.email).map_err(|e| {
            tracing::error!(error = %e, "Token issuance failed");
            error_with_code(500, "Internal server error")
        })?;

        Ok(AuthPayload {
            token,
            user_id: user.id,
        })
    }

    /// Create a post owned by the caller.
    async fn create_post(ctx: &GraphQLContext, post_input: PostInput) -> FieldResult<PostData> {
        let caller = require_authenticated(&ctx.identity).map_err(policy_error)?;

        let mut errors = validation::validate_post_input(&post_input.title, &post_input.content);
        let image_url = match post_input.image_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                errors.push("No image provided".to_string());
                String::new()
            }
        };
        if !errors.is_empty() {
            return Err(validation_error(errors));
        }

        let post = Post::new(
            caller.user_id,
            post_input.title.trim().to_string(),
            post_input.content.trim().to_string(),
            image_url,
        );
        let saved = ctx.state.posts.insert(post).await.map_err(repo_error)?;

        broadcast(ctx, PostEvent::Create { post: saved.clone() }).await;

        Ok(saved.into())
    }

    /// Edit a post; only its creator may do this.
    async fn update_post(
        ctx: &GraphQLContext,
        id: Uuid,
        post_input: PostInput,
    ) -> FieldResult<PostData> {
        let caller = require_authenticated(&ctx.identity).map_err(policy_error)?;

        let mut post = ctx
            .state
            .posts
            .find_by_id(id)
            .await
            .map_err(repo_error)?
            .ok_or_else(|| error_with_code(404, "Could not find post"))?;

        require_ownership(caller, post.creator_id).map_err(policy_error)?;

        let errors = validation::validate_post_input(&post_input.title, &post_input.content);
        if !errors.is_empty() {
            return Err(validation_error(errors));
        }

        post.apply_edit(
            post_input.title.trim().to_string(),
            post_input.content.trim().to_string(),
            post_input.image_url.filter(|url| !url.trim().is_empty()),
        );
        let saved = ctx.state.posts.update(post).await.map_err(repo_error)?;

        broadcast(ctx, PostEvent::Update { post: saved.clone() }).await;

        Ok(saved.into())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
