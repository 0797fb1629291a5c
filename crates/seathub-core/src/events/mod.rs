//! Domain events and client-facing commands.

pub mod session;
