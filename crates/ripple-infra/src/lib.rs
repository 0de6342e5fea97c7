//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`:
//! database repositories (SeaORM/Postgres), JWT token service, Argon2
//! password hashing and the in-process broadcast channel.

pub mod auth;
pub mod broadcast;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use broadcast::ChannelBroadcaster;
pub use database::{DatabaseConfig, DatabaseConnections};
