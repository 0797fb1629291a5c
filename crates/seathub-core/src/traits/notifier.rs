//! Notification gateway trait.

use async_trait::async_trait;

use crate::events::session::SessionCommand;
use crate::result::AppResult;
use crate::types::id::ConnectionId;

/// Delivers a session command to one client connection.
///
/// Implementations own the connection lifecycle entirely; the session
/// core only routes by [`ConnectionId`]. Delivery failure (stale or
/// closed handle, serialization error) is an expected outcome: callers
/// log it and carry on, they never propagate it as an operation failure.
/// An unserializable payload must fail closed without attempting a send.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send a command to the given connection.
    async fn send(&self, connection: ConnectionId, command: SessionCommand) -> AppResult<()>;
}
