//! Member repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_core::types::id::MemberId;
use seathub_entity::member::Member;
use seathub_session::store::MemberStore;

/// Repository for the member table.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a member by id.
    pub async fn find(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT id, username, remaining_seconds, created_at, updated_at \
             FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    /// Overwrite a member's balance (front-desk top-up).
    pub async fn set_balance(&self, id: MemberId, remaining_seconds: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE members SET remaining_seconds = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(remaining_seconds)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update member balance", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(format!("Member {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        self.find(id).await
    }
}
