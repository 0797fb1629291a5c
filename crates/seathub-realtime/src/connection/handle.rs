//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::warn;

use seathub_core::types::id::ConnectionId;

/// A handle to a single terminal connection.
///
/// Holds the sender half of the connection's outbound frame buffer plus
/// metadata. The socket itself lives in the connection's server task;
/// everything else routes through this handle by id.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Remote peer address, for logs.
    pub peer: String,
    /// Sender for outbound frames (pre-serialized JSON).
    pub sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    pub alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(peer: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: ConnectionId::new(),
            peer,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue an outbound frame for this connection.
    ///
    /// Returns `false` when the frame could not be queued: the buffer is
    /// full (frame dropped) or the receiving task is gone (handle marked
    /// dead).
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(connection = %self.id, "Connection send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_delivers_frame() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new("test".to_string(), tx);

        assert!(handle.send("hello".to_string()));
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_send_to_closed_receiver_marks_dead() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let handle = ConnectionHandle::new("test".to_string(), tx);

        assert!(!handle.send("hello".to_string()));
        assert!(!handle.is_alive());
        // Subsequent sends short-circuit.
        assert!(!handle.send("again".to_string()));
    }
}
