//! Seat repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_core::types::id::{MemberId, SeatNumber};
use seathub_entity::seat::SeatRow;
use seathub_session::store::SeatStore;

/// Repository for the seat table.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Create a new seat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch all seat rows ordered by seat number.
    pub async fn find_all(&self) -> AppResult<Vec<SeatRow>> {
        sqlx::query_as::<_, SeatRow>(
            "SELECT seat_number, user_id, usage_time FROM seats ORDER BY seat_number",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list seats", e))
    }

    /// Fetch one seat row.
    pub async fn find_by_number(&self, seat: SeatNumber) -> AppResult<Option<SeatRow>> {
        sqlx::query_as::<_, SeatRow>(
            "SELECT seat_number, user_id, usage_time FROM seats WHERE seat_number = $1",
        )
        .bind(seat)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find seat", e))
    }

    /// Update a seat's occupancy columns.
    pub async fn set_assignment(
        &self,
        seat: SeatNumber,
        usage_time: Option<i64>,
        occupant: Option<MemberId>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE seats SET usage_time = $2, user_id = $3 WHERE seat_number = $1",
        )
        .bind(seat)
        .bind(usage_time)
        .bind(occupant)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update seat assignment", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::new(
                ErrorKind::Database,
                format!("Seat {seat} has no row"),
            ));
        }
        Ok(())
    }

    /// Mirror one countdown tick: the seat row's `usage_time` and the
    /// occupant's member balance, in a single transaction so a crash
    /// between the two writes can never leave them divergent.
    pub async fn record_tick(
        &self,
        seat: SeatNumber,
        occupant: MemberId,
        remaining_seconds: i64,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin tick transaction", e)
        })?;

        sqlx::query("UPDATE seats SET usage_time = $2 WHERE seat_number = $1")
            .bind(seat)
            .bind(remaining_seconds)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update seat countdown", e)
            })?;

        sqlx::query(
            "UPDATE members SET remaining_seconds = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(occupant)
        .bind(remaining_seconds)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member balance", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit tick transaction", e)
        })
    }
}

#[async_trait]
impl SeatStore for SeatRepository {
    async fn list_all(&self) -> AppResult<Vec<SeatRow>> {
        self.find_all().await
    }

    async fn update_assignment(
        &self,
        seat: SeatNumber,
        usage_time: Option<i64>,
        occupant: Option<MemberId>,
    ) -> AppResult<()> {
        self.set_assignment(seat, usage_time, occupant).await
    }

    async fn persist_tick(
        &self,
        seat: SeatNumber,
        occupant: MemberId,
        remaining_seconds: i64,
    ) -> AppResult<()> {
        self.record_tick(seat, occupant, remaining_seconds).await
    }
}
