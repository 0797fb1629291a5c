//! WebSocket-backed notifier for session commands.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use seathub_core::error::AppError;
use seathub_core::events::session::SessionCommand;
use seathub_core::result::AppResult;
use seathub_core::traits::notifier::Notifier;
use seathub_core::types::id::ConnectionId;

use crate::connection::manager::ConnectionManager;

/// Delivers session commands over the terminal's WebSocket connection.
#[derive(Debug, Clone)]
pub struct WsNotifier {
    connections: Arc<ConnectionManager>,
}

impl WsNotifier {
    /// Create a notifier over the given connection registry.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl Notifier for WsNotifier {
    async fn send(&self, connection: ConnectionId, command: SessionCommand) -> AppResult<()> {
        // Serialize before touching the connection so an encoding
        // failure never half-delivers.
        let frame = serde_json::to_string(&command)?;

        let handle = self
            .connections
            .get(connection)
            .ok_or_else(|| AppError::notification(format!("Connection {connection} is gone")))?;

        if !handle.send(frame) {
            return Err(AppError::notification(format!(
                "Connection {connection} could not accept the frame"
            )));
        }

        debug!(connection = %connection, ?command, "Session command queued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seathub_core::error::ErrorKind;
    use tokio::sync::mpsc;

    use crate::connection::handle::ConnectionHandle;

    #[tokio::test]
    async fn test_send_delivers_logout_frame() {
        let manager = Arc::new(ConnectionManager::new());
        let (tx, mut rx) = mpsc::channel(4);
        let handle = Arc::new(ConnectionHandle::new("test".to_string(), tx));
        let id = handle.id;
        manager.register(handle);

        let notifier = WsNotifier::new(manager);
        notifier.send(id, SessionCommand::Logout).await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some(r#"{"command":"logout"}"#));
    }

    #[tokio::test]
    async fn test_send_to_unknown_connection_fails() {
        let notifier = WsNotifier::new(Arc::new(ConnectionManager::new()));

        let error = notifier
            .send(ConnectionId::new(), SessionCommand::Logout)
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Notification);
    }

    #[tokio::test]
    async fn test_send_to_dead_connection_fails() {
        let manager = Arc::new(ConnectionManager::new());
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let handle = Arc::new(ConnectionHandle::new("test".to_string(), tx));
        let id = handle.id;
        manager.register(handle);

        let notifier = WsNotifier::new(manager);
        let error = notifier.send(id, SessionCommand::Logout).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Notification);
    }
}
