//! Realtime channel - socket.io fan-out of post events.
//!
//! The socket.io layer is a tower service, so it is mounted on its own axum
//! listener next to the actix HTTP server. Handlers never talk to sockets
//! directly; they go through the [`Broadcaster`] port backed by the shared
//! `SocketIo` handle.

use std::net::ToSocketAddrs;

use async_trait::async_trait;
use socketioxide::{SocketIo, extract::SocketRef, layer::SocketIoLayer};

use ripple_core::domain::PostEvent;
use ripple_core::ports::{BroadcastError, Broadcaster};

/// Event name post changes are published under.
pub const POSTS_EVENT: &str = "posts";

/// Broadcaster backed by the socket.io connection registry.
///
/// Emits reach every currently connected client, including the one whose
/// request triggered the event. Connection tracking itself is owned by
/// socketioxide; this only reads the registry to emit.
pub struct SocketBroadcaster {
    io: SocketIo,
}

impl SocketBroadcaster {
    pub fn new(io: SocketIo) -> Self {
        Self { io }
    }
}

#[async_trait]
impl Broadcaster for SocketBroadcaster {
    async fn emit(&self, event: &PostEvent) -> Result<(), BroadcastError> {
        self.io
            .emit(POSTS_EVENT, event)
            .map_err(|e| BroadcastError::Emit(e.to_string()))?;
        tracing::debug!(action = event.action(), "Post event broadcast");
        Ok(())
    }
}

/// Register connection handlers on the root namespace.
pub fn configure_socket_handlers(io: SocketIo) {
    io.ns("/", |socket: SocketRef| async move {
        tracing::info!(socket_id = %socket.id, "Client connected");

        socket.on_disconnect(|socket: SocketRef| async move {
            tracing::info!(socket_id = %socket.id, "Client disconnected");
        });
    });
}

/// Serve the socket.io layer on its own listener.
pub async fn serve(addr: impl ToSocketAddrs, layer: SocketIoLayer) -> std::io::Result<()> {
    let app = axum::Router::new().layer(layer);

    let addr = addr
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| std::io::Error::other("no realtime listen address resolved"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Realtime channel listening");

    axum::serve(listener, app).await
}
