//! Application state - shared across all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use ripple_core::ports::{Broadcaster, PostRepository, UserRepository};
use ripple_infra::database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Build the application state on top of the connected store.
    pub fn new(
        db: &DatabaseConnections,
        broadcaster: Arc<dyn Broadcaster>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            broadcaster,
            upload_dir,
        }
    }
}
