//! WebSocket terminal layer for SeatHub.
//!
//! Owns every live terminal connection: accepting sockets, parsing
//! command frames into [`SessionController`] calls, and routing the
//! session core's outbound commands back to the right terminal. The
//! session core only ever sees opaque connection ids.
//!
//! [`SessionController`]: seathub_session::SessionController

pub mod connection;
pub mod message;
pub mod notifier;
pub mod server;

pub use connection::manager::ConnectionManager;
pub use notifier::WsNotifier;
pub use server::CommandServer;
