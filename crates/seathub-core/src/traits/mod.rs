//! Gateway traits consumed by the session core.

pub mod notifier;
