//! Registry of live terminal connections.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use seathub_core::types::id::ConnectionId;

use crate::connection::handle::ConnectionHandle;

/// Tracks every live terminal connection by id.
///
/// Registration happens when the WebSocket handshake completes and
/// removal when the socket closes. Lookups come from the notifier,
/// which only ever holds a [`ConnectionId`].
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionManager {
    /// Create an empty connection manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection.
    pub fn register(&self, handle: Arc<ConnectionHandle>) {
        debug!(connection = %handle.id, peer = %handle.peer, "Connection registered");
        self.connections.insert(handle.id, handle);
    }

    /// Remove a connection, marking its handle dead.
    pub fn unregister(&self, id: ConnectionId) {
        if let Some((_, handle)) = self.connections.remove(&id) {
            handle.mark_dead();
            debug!(connection = %id, "Connection unregistered");
        }
    }

    /// Look up a live connection handle.
    pub fn get(&self, id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of live connections.
    pub fn count(&self) -> usize {
        self.connections.len()
    }

    /// Mark every connection dead and drop the handles.
    ///
    /// Dropping the senders ends each connection's writer task, which
    /// closes the socket on its way out.
    pub fn close_all(&self) {
        let open = self.count();
        for entry in self.connections.iter() {
            entry.value().mark_dead();
        }
        self.connections.clear();
        info!(closed = open, "All connections closed");
    }
}
