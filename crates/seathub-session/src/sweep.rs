//! The periodic time-decrement sweep.

use std::sync::Arc;

use tracing::{debug, warn};

use seathub_core::error::ErrorKind;
use seathub_core::events::session::SessionCommand;
use seathub_core::result::AppResult;
use seathub_core::traits::notifier::Notifier;

use crate::controller::SessionController;
use crate::registry::SeatRegistry;
use crate::seat::{Occupancy, Seat};
use crate::store::SeatStore;

/// Counts from one sweep over the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Seats that were active and got decremented.
    pub decremented: usize,
    /// Seats whose countdown expired this tick.
    pub expired: usize,
    /// Seats whose handling failed (logged, sweep continued).
    pub failed: usize,
}

/// What happened to one seat during a tick.
enum TickOutcome {
    Skipped,
    Decremented,
    Expired,
}

/// Walks every seat once per tick, decrementing active countdowns and
/// expiring the ones that run out.
///
/// Each seat is handled in isolation: a persistence or notification
/// failure on one seat is logged and the sweep moves on, so a single
/// bad seat can never stall everyone else's clock.
pub struct DecrementSweep {
    /// The seat registry.
    registry: Arc<SeatRegistry>,
    /// Controller used for the expiry release.
    controller: Arc<SessionController>,
    /// Seat-table gateway.
    seats: Arc<dyn SeatStore>,
    /// Notification gateway.
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for DecrementSweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecrementSweep").finish()
    }
}

impl DecrementSweep {
    /// Create a new sweep over the given registry.
    pub fn new(
        registry: Arc<SeatRegistry>,
        controller: Arc<SessionController>,
        seats: Arc<dyn SeatStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            controller,
            seats,
            notifier,
        }
    }

    /// Run one tick over all seats in registry order.
    pub async fn run_tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();

        for seat in self.registry.iter() {
            match self.tick_seat(seat).await {
                Ok(TickOutcome::Skipped) => {}
                Ok(TickOutcome::Decremented) => summary.decremented += 1,
                Ok(TickOutcome::Expired) => {
                    summary.decremented += 1;
                    summary.expired += 1;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(seat = %seat.number(), error = %e, "Seat tick failed, continuing sweep");
                }
            }
        }

        if summary.expired > 0 {
            debug!(
                decremented = summary.decremented,
                expired = summary.expired,
                "Tick expired seats"
            );
        }
        summary
    }

    /// Decrement one seat and handle expiry.
    ///
    /// The decrement and its mirroring write happen under the seat's
    /// lock; the expiry side effects run after the lock is dropped, on
    /// an occupant/connection snapshot taken before anything clears the
    /// seat.
    async fn tick_seat(&self, seat: &Arc<Seat>) -> AppResult<TickOutcome> {
        let (occupant, connection) = {
            let mut state = seat.lock().await;

            let Occupancy::Active {
                occupant,
                remaining_seconds,
            } = state.occupancy
            else {
                return Ok(TickOutcome::Skipped);
            };

            let remaining = remaining_seconds - 1;
            state.occupancy = Occupancy::Active {
                occupant,
                remaining_seconds: remaining,
            };
            self.seats
                .persist_tick(seat.number(), occupant, remaining)
                .await?;

            if remaining >= 0 {
                return Ok(TickOutcome::Decremented);
            }

            (occupant, state.connection)
        };

        if let Some(connection) = connection {
            if let Err(e) = self.notifier.send(connection, SessionCommand::Logout).await {
                warn!(
                    seat = %seat.number(),
                    connection = %connection,
                    error = %e,
                    "Logout notification failed"
                );
            }
        }

        match self.controller.release(occupant, seat.number()).await {
            Ok(()) => Ok(TickOutcome::Expired),
            Err(e) if e.kind == ErrorKind::OccupantMismatch => {
                // A client release won the race between the decrement and
                // this expiry; the seat is already in someone else's hands
                // or empty.
                debug!(seat = %seat.number(), occupant = %occupant, "Seat vacated before expiry release");
                Ok(TickOutcome::Expired)
            }
            Err(e) => Err(e),
        }
    }
}
