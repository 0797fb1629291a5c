//! Seat row model and derived status.

pub mod model;

pub use model::{SeatRow, SeatStatus, USAGE_TIME_RESERVED};
