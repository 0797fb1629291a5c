//! Seat entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use seathub_core::types::id::{MemberId, SeatNumber};

/// Sentinel stored in `usage_time` for a reserved seat.
///
/// The column is nullable: NULL encodes an empty seat, `-1` a
/// reservation, and any value `>= 0` the remaining seconds of an active
/// session. [`SeatRow::status`] is the only place this encoding is
/// interpreted.
pub const USAGE_TIME_RESERVED: i64 = -1;

/// One persisted seat row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SeatRow {
    /// Stable seat number, unique within the facility.
    pub seat_number: SeatNumber,
    /// The occupying member, if any.
    pub user_id: Option<MemberId>,
    /// Remaining seconds (`>= 0`), the reserved sentinel (`-1`), or NULL
    /// for an empty seat.
    pub usage_time: Option<i64>,
}

/// Occupancy status derived from a seat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Nobody holds the seat.
    Empty,
    /// Held for a member with no time countdown.
    Reserved,
    /// Occupied and counting down remaining seconds.
    Active,
}

impl SeatRow {
    /// Derive the occupancy status from the stored columns.
    ///
    /// A row with an occupant but a NULL `usage_time` is inconsistent
    /// (a partial write from an earlier crash); it is treated as empty
    /// so the seat becomes assignable again, and the caller logs it.
    pub fn status(&self) -> SeatStatus {
        match (self.user_id, self.usage_time) {
            (None, _) => SeatStatus::Empty,
            (Some(_), None) => SeatStatus::Empty,
            (Some(_), Some(USAGE_TIME_RESERVED)) => SeatStatus::Reserved,
            (Some(_), Some(_)) => SeatStatus::Active,
        }
    }

    /// Whether the stored columns form a legal combination.
    pub fn is_consistent(&self) -> bool {
        !(self.user_id.is_some() && self.usage_time.is_none())
    }

    /// Remaining seconds for an active seat, `None` otherwise.
    pub fn remaining_seconds(&self) -> Option<i64> {
        match self.status() {
            SeatStatus::Active => self.usage_time,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: Option<i64>, usage_time: Option<i64>) -> SeatRow {
        SeatRow {
            seat_number: SeatNumber(1),
            user_id: user_id.map(MemberId),
            usage_time,
        }
    }

    #[test]
    fn test_empty_when_no_occupant() {
        assert_eq!(row(None, None).status(), SeatStatus::Empty);
        // Stale usage_time without an occupant still reads as empty.
        assert_eq!(row(None, Some(100)).status(), SeatStatus::Empty);
    }

    #[test]
    fn test_reserved_sentinel() {
        let r = row(Some(7), Some(-1));
        assert_eq!(r.status(), SeatStatus::Reserved);
        assert_eq!(r.remaining_seconds(), None);
    }

    #[test]
    fn test_active_with_balance() {
        let r = row(Some(42), Some(3600));
        assert_eq!(r.status(), SeatStatus::Active);
        assert_eq!(r.remaining_seconds(), Some(3600));
    }

    #[test]
    fn test_active_at_zero() {
        assert_eq!(row(Some(42), Some(0)).status(), SeatStatus::Active);
    }

    #[test]
    fn test_inconsistent_row_reads_empty() {
        let r = row(Some(42), None);
        assert!(!r.is_consistent());
        assert_eq!(r.status(), SeatStatus::Empty);
    }
}
