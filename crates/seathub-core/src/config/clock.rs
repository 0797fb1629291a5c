//! Time-decrement tick configuration.

use serde::{Deserialize, Serialize};

/// Settings for the periodic time-decrement sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Whether the decrement sweep runs at all. Disable for read-only
    /// replicas or maintenance windows.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Seconds between sweeps. One tick subtracts one second from every
    /// active seat, so the default of 1 keeps wall clock and balances in
    /// step. Confirm with the facility operator before changing the unit.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_seconds: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            tick_interval_seconds: default_tick_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    1
}
