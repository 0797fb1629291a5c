//! # seathub-database
//!
//! PostgreSQL connection management and the concrete repository
//! implementations behind the session core's store contracts.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
