//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod broadcast;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use broadcast::{BroadcastError, Broadcaster};
pub use repository::{BaseRepository, FEED_PAGE_SIZE, PostRepository, UserRepository};
