//! In-process broadcaster over a tokio broadcast channel.
//!
//! Fan-out within a single process: every active subscriber receives each
//! emitted event, a subscriber that joins later gets nothing retroactively.

use async_trait::async_trait;
use tokio::sync::broadcast;

use ripple_core::domain::PostEvent;
use ripple_core::ports::{BroadcastError, Broadcaster};

/// Broadcaster backed by `tokio::sync::broadcast`.
pub struct ChannelBroadcaster {
    sender: broadcast::Sender<PostEvent>,
}

impl ChannelBroadcaster {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Attach a new subscriber. Events emitted before this call are not
    /// replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<PostEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChannelBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl Broadcaster for ChannelBroadcaster {
    async fn emit(&self, event: &PostEvent) -> Result<(), BroadcastError> {
        // A send error only means nobody is listening, which matches the
        // contract: deliver to all currently connected clients, even if that
        // set is empty.
        let _ = self.sender.send(event.clone());
        tracing::debug!(action = event.action(), "post event published");
        Ok(())
    }
}
