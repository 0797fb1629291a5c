//! The seat registry: every physical seat, loaded once at startup.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_core::types::id::SeatNumber;

use crate::seat::Seat;
use crate::store::SeatStore;

/// Mapping from seat number to seat, built once from the persisted
/// snapshot and read-only afterwards.
///
/// Entries are never added or removed at runtime, so lookups need no
/// lock; only each seat's own mutable payload is contended, behind that
/// seat's mutex. The `BTreeMap` keeps sweep iteration in ascending seat
/// order.
#[derive(Debug)]
pub struct SeatRegistry {
    seats: BTreeMap<SeatNumber, Arc<Seat>>,
}

impl SeatRegistry {
    /// Load all seat rows and build the registry.
    ///
    /// A fetch failure here is fatal to startup; the caller is expected
    /// to abort the process rather than retry.
    pub async fn initialize(store: &dyn SeatStore) -> AppResult<Self> {
        let rows = store.list_all().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Initialization,
                "Failed to load seat rows at startup",
                e,
            )
        })?;

        let mut seats = BTreeMap::new();
        for row in &rows {
            if !row.is_consistent() {
                warn!(
                    seat = %row.seat_number,
                    occupant = ?row.user_id,
                    "Seat row has an occupant but no usage time; loading as empty"
                );
            }
            seats.insert(row.seat_number, Arc::new(Seat::from_row(row)));
        }

        info!(seats = seats.len(), "Seat registry initialized");
        Ok(Self { seats })
    }

    /// Look up a seat by number.
    ///
    /// Seat numbers are fixed at deploy time, so an unknown number is a
    /// caller bug, not a transient condition.
    pub fn get(&self, number: SeatNumber) -> AppResult<Arc<Seat>> {
        self.seats
            .get(&number)
            .cloned()
            .ok_or_else(|| AppError::seat_not_found(format!("Unknown seat number {number}")))
    }

    /// Iterate all seats in ascending seat-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Seat>> {
        self.seats.values()
    }

    /// Number of seats in the facility.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether the registry holds no seats.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::Occupancy;
    use crate::testkit::MockSeatStore;

    use seathub_core::error::ErrorKind;
    use seathub_core::types::id::MemberId;
    use seathub_entity::seat::SeatRow;

    fn row(number: i32, user_id: Option<i64>, usage_time: Option<i64>) -> SeatRow {
        SeatRow {
            seat_number: SeatNumber(number),
            user_id: user_id.map(MemberId),
            usage_time,
        }
    }

    #[tokio::test]
    async fn test_initialize_builds_every_row() {
        let store = MockSeatStore::with_rows(vec![
            row(1, None, None),
            row(2, Some(7), Some(-1)),
            row(3, Some(42), Some(3600)),
        ]);

        let registry = SeatRegistry::initialize(&store).await.expect("initialize");
        assert_eq!(registry.len(), 3);

        assert_eq!(
            registry
                .get(SeatNumber(1))
                .expect("seat 1")
                .snapshot()
                .await
                .occupancy,
            Occupancy::Empty
        );
        assert_eq!(
            registry
                .get(SeatNumber(2))
                .expect("seat 2")
                .snapshot()
                .await
                .occupancy,
            Occupancy::Reserved {
                occupant: MemberId(7)
            }
        );
        assert_eq!(
            registry
                .get(SeatNumber(3))
                .expect("seat 3")
                .snapshot()
                .await
                .occupancy,
            Occupancy::Active {
                occupant: MemberId(42),
                remaining_seconds: 3600
            }
        );
    }

    #[tokio::test]
    async fn test_initialize_fetch_failure_is_fatal() {
        let store = MockSeatStore::with_rows(vec![]);
        store.fail_list();

        let err = SeatRegistry::initialize(&store)
            .await
            .expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::Initialization);
    }

    #[tokio::test]
    async fn test_get_unknown_seat() {
        let store = MockSeatStore::with_rows(vec![row(1, None, None)]);
        let registry = SeatRegistry::initialize(&store).await.expect("initialize");

        let err = registry.get(SeatNumber(99)).expect_err("unknown seat");
        assert_eq!(err.kind, ErrorKind::SeatNotFound);
    }

    #[tokio::test]
    async fn test_iteration_is_ordered() {
        let store = MockSeatStore::with_rows(vec![
            row(5, None, None),
            row(1, None, None),
            row(3, None, None),
        ]);
        let registry = SeatRegistry::initialize(&store).await.expect("initialize");

        let numbers: Vec<i32> = registry.iter().map(|s| s.number().0).collect();
        assert_eq!(numbers, vec![1, 3, 5]);
    }
}
