//! Runtime seat entity and its exclusive lock.

use tokio::sync::{Mutex, MutexGuard};

use seathub_core::types::id::{ConnectionId, MemberId, SeatNumber};
use seathub_entity::seat::{SeatRow, SeatStatus};

/// Occupancy of one seat.
///
/// The tagged representation makes the illegal combinations of the
/// stored encoding unrepresentable: an occupant id exists exactly when
/// the seat is not empty, and a countdown exists exactly when it is
/// active. Reserved seats carry no countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Nobody holds the seat.
    Empty,
    /// Held for a member with no time countdown.
    Reserved {
        /// The member holding the reservation.
        occupant: MemberId,
    },
    /// Occupied and counting down.
    Active {
        /// The seated member.
        occupant: MemberId,
        /// Remaining paid seconds. May transiently reach -1 inside a
        /// decrement step; the expiry release resolves it before the
        /// step completes.
        remaining_seconds: i64,
    },
}

impl Occupancy {
    /// The occupant, if the seat is held at all.
    pub fn occupant(&self) -> Option<MemberId> {
        match self {
            Self::Empty => None,
            Self::Reserved { occupant } | Self::Active { occupant, .. } => Some(*occupant),
        }
    }

    /// Whether the seat is free for assignment.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The mutable payload of a seat, guarded by the seat's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatState {
    /// Who holds the seat and with what countdown.
    pub occupancy: Occupancy,
    /// Routing handle for the occupant's live connection. The seat never
    /// owns the connection; the realtime layer does.
    pub connection: Option<ConnectionId>,
}

impl SeatState {
    /// An empty, unconnected seat.
    pub fn empty() -> Self {
        Self {
            occupancy: Occupancy::Empty,
            connection: None,
        }
    }
}

/// One physical seat: a stable number plus lock-guarded mutable state.
///
/// The mutex is the only synchronization primitive in the session core.
/// Every read-then-write of the state, including the synchronous
/// persistence call that mirrors it, must happen while holding the
/// guard, so a client release and a sweep decrement on the same seat
/// are totally ordered and can never tear each other's updates.
#[derive(Debug)]
pub struct Seat {
    number: SeatNumber,
    state: Mutex<SeatState>,
}

impl Seat {
    /// Build the runtime seat from its persisted row.
    pub fn from_row(row: &SeatRow) -> Self {
        let occupancy = match (row.user_id, row.status()) {
            (Some(occupant), SeatStatus::Reserved) => Occupancy::Reserved { occupant },
            (Some(occupant), SeatStatus::Active) => Occupancy::Active {
                occupant,
                remaining_seconds: row.usage_time.unwrap_or(0),
            },
            _ => Occupancy::Empty,
        };

        Self {
            number: row.seat_number,
            state: Mutex::new(SeatState {
                occupancy,
                connection: None,
            }),
        }
    }

    /// The seat's stable number.
    pub fn number(&self) -> SeatNumber {
        self.number
    }

    /// Acquire the seat's exclusive lock.
    pub async fn lock(&self) -> MutexGuard<'_, SeatState> {
        self.state.lock().await
    }

    /// Read a point-in-time copy of the state.
    pub async fn snapshot(&self) -> SeatState {
        *self.state.lock().await
    }
}
