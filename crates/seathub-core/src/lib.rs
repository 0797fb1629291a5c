//! Core building blocks shared by every SeatHub crate.
//!
//! This crate carries no business logic of its own: it defines the
//! unified error type, the configuration schema, domain identifier
//! newtypes, session command events, and the notification gateway
//! trait that the session core consumes.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;
