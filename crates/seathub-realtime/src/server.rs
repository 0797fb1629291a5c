//! WebSocket command server for seat terminals.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use seathub_core::config::server::ServerConfig;
use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_core::types::id::ConnectionId;
use seathub_session::SessionController;

use crate::connection::handle::ConnectionHandle;
use crate::connection::manager::ConnectionManager;
use crate::message::{CommandReply, TerminalCommand};

/// Accepts terminal WebSocket connections and dispatches their command
/// frames to the session controller.
///
/// Each accepted socket gets its own task plus a writer task draining
/// the connection's outbound buffer, so a slow terminal never blocks
/// the accept loop or the session core.
pub struct CommandServer {
    config: ServerConfig,
    controller: Arc<SessionController>,
    connections: Arc<ConnectionManager>,
}

impl CommandServer {
    /// Create a new command server.
    pub fn new(
        config: ServerConfig,
        controller: Arc<SessionController>,
        connections: Arc<ConnectionManager>,
    ) -> Self {
        Self {
            config,
            controller,
            connections,
        }
    }

    /// Run the accept loop until shutdown is signalled.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) -> AppResult<()> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Initialization,
                format!("Failed to bind command server to {address}"),
                e,
            )
        })?;
        info!(%address, "Command server listening");

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let controller = self.controller.clone();
                            let connections = self.connections.clone();
                            let buffer = self.config.send_buffer_size;
                            tokio::spawn(async move {
                                if let Err(e) =
                                    handle_connection(stream, peer, controller, connections, buffer)
                                        .await
                                {
                                    warn!(%peer, error = %e, "Terminal connection failed");
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "Failed to accept connection"),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
            }
        }

        self.connections.close_all();
        info!("Command server stopped");
        Ok(())
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    controller: Arc<SessionController>,
    connections: Arc<ConnectionManager>,
    buffer: usize,
) -> AppResult<()> {
    let socket = tokio_tungstenite::accept_async(stream).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, "WebSocket handshake failed", e)
    })?;

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(buffer);
    let handle = Arc::new(ConnectionHandle::new(peer.to_string(), outbound_tx));
    let connection = handle.id;
    connections.register(handle);
    info!(connection = %connection, %peer, "Terminal connected");

    let (mut sink, mut inbound) = socket.split();
    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    while let Some(message) = inbound.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let reply = dispatch(&controller, connection, text.as_str()).await;
                match serde_json::to_string(&reply) {
                    Ok(frame) => {
                        if let Some(handle) = connections.get(connection) {
                            handle.send(frame);
                        }
                    }
                    Err(e) => warn!(connection = %connection, error = %e, "Failed to encode reply"),
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(connection = %connection, error = %e, "Socket read failed");
                break;
            }
        }
    }

    // Dropping the handle ends the writer task, which closes the socket.
    connections.unregister(connection);
    let _ = writer.await;
    info!(connection = %connection, "Terminal disconnected");
    Ok(())
}

/// Parse one inbound frame and run it against the session controller.
async fn dispatch(
    controller: &SessionController,
    connection: ConnectionId,
    raw: &str,
) -> CommandReply {
    let command: TerminalCommand = match serde_json::from_str(raw) {
        Ok(command) => command,
        Err(e) => {
            debug!(connection = %connection, error = %e, "Unparseable command frame");
            return CommandReply::from_error(&AppError::from(e));
        }
    };

    let outcome = match command {
        TerminalCommand::Assign {
            user_id,
            seat_number,
        } => controller.assign(user_id, seat_number, connection).await,
        TerminalCommand::Reserve {
            user_id,
            seat_number,
        } => controller.reserve(user_id, seat_number, connection).await,
        TerminalCommand::Release {
            user_id,
            seat_number,
        } => controller.release(user_id, seat_number).await,
    };

    match outcome {
        Ok(()) => CommandReply::Ok,
        Err(e) => {
            debug!(connection = %connection, code = %e.kind, "Command rejected");
            CommandReply::from_error(&e)
        }
    }
}
