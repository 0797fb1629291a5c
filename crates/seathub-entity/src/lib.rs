//! Persisted entity models for SeatHub.

pub mod member;
pub mod seat;
