//! Periodic tick loop for the time-decrement sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use seathub_core::config::clock::ClockConfig;
use seathub_session::DecrementSweep;

/// Drives the decrement sweep at a fixed cadence until cancelled.
///
/// Ticks are paced from the loop start, not from sweep completion. A
/// sweep that overruns its interval delays the next tick instead of
/// bursting to catch up, so a slow store costs wall clock accuracy
/// rather than double-charging seats.
pub struct TickScheduler {
    sweep: Arc<DecrementSweep>,
    config: ClockConfig,
}

impl TickScheduler {
    /// Create a scheduler over the given sweep.
    pub fn new(sweep: Arc<DecrementSweep>, config: ClockConfig) -> Self {
        Self { sweep, config }
    }

    /// Run the tick loop until shutdown is signalled.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        if !self.config.enabled {
            info!("Decrement sweep disabled by configuration");
            return;
        }

        let period = Duration::from_secs(self.config.tick_interval_seconds.max(1));
        // First tick fires one full period after startup so freshly
        // restored sessions are not charged for second zero.
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_seconds = self.config.tick_interval_seconds,
            "Tick scheduler started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let summary = self.sweep.run_tick().await;
                    if summary.failed > 0 {
                        warn!(
                            decremented = summary.decremented,
                            expired = summary.expired,
                            failed = summary.failed,
                            "Tick completed with failures"
                        );
                    } else if summary.expired > 0 {
                        info!(
                            decremented = summary.decremented,
                            expired = summary.expired,
                            "Tick expired sessions"
                        );
                    } else {
                        debug!(decremented = summary.decremented, "Tick completed");
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Tick scheduler stopped");
    }
}
