//! Persistence contracts consumed by the session core.
//!
//! The core issues four query shapes and nothing else: load all seats,
//! look up one member, mirror a seat assignment, and mirror one tick of
//! countdown. Implementations must be safe for concurrent invocation
//! from many seats at once (pooling is their concern); the core never
//! retries, so any failure surfaces to the calling operation as a
//! `Database` error.

use async_trait::async_trait;

use seathub_core::result::AppResult;
use seathub_core::types::id::{MemberId, SeatNumber};
use seathub_entity::member::Member;
use seathub_entity::seat::SeatRow;

/// Seat-table gateway.
#[async_trait]
pub trait SeatStore: Send + Sync + 'static {
    /// Fetch every seat row, ordered by seat number.
    async fn list_all(&self) -> AppResult<Vec<SeatRow>>;

    /// Mirror a seat's `(usage_time, user_id)` columns.
    ///
    /// `(None, None)` clears the seat; `(Some(-1), Some(id))` records a
    /// reservation; `(Some(balance), Some(id))` records an active
    /// session.
    async fn update_assignment(
        &self,
        seat: SeatNumber,
        usage_time: Option<i64>,
        occupant: Option<MemberId>,
    ) -> AppResult<()>;

    /// Mirror one decrement: the seat row's countdown and the occupant's
    /// member balance, committed atomically so a crash can never leave
    /// the two rows divergent.
    async fn persist_tick(
        &self,
        seat: SeatNumber,
        occupant: MemberId,
        remaining_seconds: i64,
    ) -> AppResult<()>;
}

/// Member-table gateway.
#[async_trait]
pub trait MemberStore: Send + Sync + 'static {
    /// Look up one member by id.
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>>;
}
