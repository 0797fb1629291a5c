//! Background scheduling for SeatHub.
//!
//! Hosts the tick loop that drives [`DecrementSweep`] at the configured
//! cadence until shutdown is signalled.
//!
//! [`DecrementSweep`]: seathub_session::DecrementSweep

pub mod scheduler;

pub use scheduler::TickScheduler;
