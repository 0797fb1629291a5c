//! Connection handles and the live-connection registry.

pub mod handle;
pub mod manager;

pub use handle::ConnectionHandle;
pub use manager::ConnectionManager;
