//! Test doubles shared by the handler and resolver tests: in-memory
//! repositories over the core ports, plus state/service factories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::domain::{Post, User};
use ripple_core::error::RepoError;
use ripple_core::ports::{
    BaseRepository, FEED_PAGE_SIZE, PasswordService, PostRepository, TokenService, UserRepository,
};
use ripple_infra::broadcast::ChannelBroadcaster;
use ripple_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use crate::state::AppState;

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post repository mirroring the fixed-size feed pagination.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    fn sorted_desc(posts: &HashMap<Uuid, Post>) -> Vec<Post> {
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(&self, page: u64) -> Result<Vec<Post>, RepoError> {
        let page = page.max(1);
        let posts = self.posts.read().await;
        Ok(Self::sorted_desc(&posts)
            .into_iter()
            .skip(((page - 1) * FEED_PAGE_SIZE) as usize)
            .take(FEED_PAGE_SIZE as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::sorted_desc(&posts)
            .into_iter()
            .filter(|p| p.creator_id == creator_id)
            .collect())
    }
}

/// Application state over in-memory repositories and a channel broadcaster.
pub fn test_state(broadcaster: Arc<ChannelBroadcaster>) -> AppState {
    AppState {
        users: Arc::new(InMemoryUserRepository::default()),
        posts: Arc::new(InMemoryPostRepository::default()),
        broadcaster,
        upload_dir: std::env::temp_dir(),
    }
}

pub fn test_token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        issuer: "test-issuer".to_string(),
    }))
}

pub fn test_password_service() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}
