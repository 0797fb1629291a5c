//! Session transitions: assign, reserve, release.

use std::sync::Arc;

use tracing::info;

use seathub_core::error::AppError;
use seathub_core::result::AppResult;
use seathub_core::types::id::{ConnectionId, MemberId, SeatNumber};
use seathub_entity::seat::model::USAGE_TIME_RESERVED;

use crate::registry::SeatRegistry;
use crate::seat::{Occupancy, SeatState};
use crate::store::{MemberStore, SeatStore};

/// Applies session transitions to single seats.
///
/// Each operation acquires the target seat's lock for its entire
/// read-modify-write, including the persistence call that mirrors the
/// change, and releases it on every exit path via the guard. Operations
/// on different seats never contend.
pub struct SessionController {
    /// The seat registry.
    registry: Arc<SeatRegistry>,
    /// Seat-table gateway.
    seats: Arc<dyn SeatStore>,
    /// Member-table gateway.
    members: Arc<dyn MemberStore>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController").finish()
    }
}

impl SessionController {
    /// Create a new session controller.
    pub fn new(
        registry: Arc<SeatRegistry>,
        seats: Arc<dyn SeatStore>,
        members: Arc<dyn MemberStore>,
    ) -> Self {
        Self {
            registry,
            seats,
            members,
        }
    }

    /// The registry this controller operates on.
    pub fn registry(&self) -> &Arc<SeatRegistry> {
        &self.registry
    }

    /// Seat a member: the seat goes active with the member's stored
    /// balance as its countdown.
    ///
    /// Fails with `SeatOccupied` before touching the store if the seat
    /// is not empty, and with `UserNotFound` if the member does not
    /// exist. If the mirroring write fails, the in-memory mutation is
    /// rolled back so memory and storage stay consistent, and the
    /// `Database` error is returned.
    pub async fn assign(
        &self,
        member_id: MemberId,
        seat_number: SeatNumber,
        connection: ConnectionId,
    ) -> AppResult<()> {
        let seat = self.registry.get(seat_number)?;
        let mut state = seat.lock().await;

        if !state.occupancy.is_empty() {
            return Err(AppError::seat_occupied(format!(
                "Seat {seat_number} is already held"
            )));
        }

        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(format!("Member {member_id} not found")))?;

        let balance = member.remaining_seconds;
        let previous = *state;
        *state = SeatState {
            occupancy: Occupancy::Active {
                occupant: member_id,
                remaining_seconds: balance,
            },
            connection: Some(connection),
        };

        if let Err(e) = self
            .seats
            .update_assignment(seat_number, Some(balance), Some(member_id))
            .await
        {
            *state = previous;
            return Err(e);
        }

        info!(
            member = %member_id,
            seat = %seat_number,
            remaining_seconds = balance,
            "Member seated"
        );
        Ok(())
    }

    /// Hold a seat for a member without starting the countdown.
    ///
    /// Same legality rules as [`assign`](Self::assign); the member must
    /// exist but no balance is read, and the reserved sentinel is
    /// mirrored to storage.
    pub async fn reserve(
        &self,
        member_id: MemberId,
        seat_number: SeatNumber,
        connection: ConnectionId,
    ) -> AppResult<()> {
        let seat = self.registry.get(seat_number)?;
        let mut state = seat.lock().await;

        if !state.occupancy.is_empty() {
            return Err(AppError::seat_occupied(format!(
                "Seat {seat_number} is already held"
            )));
        }

        self.members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(format!("Member {member_id} not found")))?;

        let previous = *state;
        *state = SeatState {
            occupancy: Occupancy::Reserved {
                occupant: member_id,
            },
            connection: Some(connection),
        };

        if let Err(e) = self
            .seats
            .update_assignment(seat_number, Some(USAGE_TIME_RESERVED), Some(member_id))
            .await
        {
            *state = previous;
            return Err(e);
        }

        info!(member = %member_id, seat = %seat_number, "Seat reserved");
        Ok(())
    }

    /// Vacate a seat on behalf of its occupant.
    ///
    /// A release by anyone but the occupant fails with
    /// `OccupantMismatch` and changes nothing. Otherwise the seat is
    /// cleared in memory first; empty is the safe terminal state, so a
    /// failure mirroring the clear is returned to the caller but the
    /// in-memory state is not reverted.
    pub async fn release(&self, member_id: MemberId, seat_number: SeatNumber) -> AppResult<()> {
        let seat = self.registry.get(seat_number)?;
        let mut state = seat.lock().await;

        if state.occupancy.occupant() != Some(member_id) {
            return Err(AppError::occupant_mismatch(format!(
                "Member {member_id} does not hold seat {seat_number}"
            )));
        }

        *state = SeatState::empty();
        self.seats.update_assignment(seat_number, None, None).await?;

        info!(member = %member_id, seat = %seat_number, "Seat released");
        Ok(())
    }
}
