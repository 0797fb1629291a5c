//! Member row model.

pub mod model;

pub use model::Member;
