//! Seat session management for SeatHub.
//!
//! This crate is the core of the system: the in-memory seat registry,
//! the per-seat locking discipline, the assign/reserve/release session
//! transitions, and the periodic time-decrement sweep with its expiry
//! side effects. Persistence and notification are consumed through the
//! [`store`] traits and the core `Notifier` trait so the whole crate is
//! testable against in-memory fakes.

pub mod controller;
pub mod registry;
pub mod seat;
pub mod store;
pub mod sweep;

#[cfg(test)]
pub(crate) mod testkit;

pub use controller::SessionController;
pub use registry::SeatRegistry;
pub use seat::{Occupancy, Seat, SeatState};
pub use store::{MemberStore, SeatStore};
pub use sweep::{DecrementSweep, TickSummary};
