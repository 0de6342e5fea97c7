//! Broadcast port - fan-out of post-change events to connected clients.

use async_trait::async_trait;

use crate::domain::PostEvent;

/// Notification broadcaster.
///
/// Delivers an event to every currently connected real-time client,
/// including the one whose action triggered it. At-most-once: a client that
/// is disconnected at emit time never sees the event, and reconnecting
/// clients get no backfill. Implementations are constructed once at server
/// startup and handed to handlers by reference.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Deliver `event` to all connected clients.
    async fn emit(&self, event: &PostEvent) -> Result<(), BroadcastError>;
}

/// Broadcast errors.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("Failed to deliver event: {0}")]
    Emit(String),
}
