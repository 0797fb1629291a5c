//! Member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use seathub_core::types::id::MemberId;

/// A registered facility member.
///
/// The stored `remaining_seconds` balance is authoritative while the
/// member is not seated; once a seat goes active the seat's in-memory
/// countdown is the live copy and the only writer back to this row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Display name used by the front desk.
    pub username: String,
    /// Remaining paid time in seconds.
    pub remaining_seconds: i64,
    /// When the member was registered.
    pub created_at: DateTime<Utc>,
    /// Last balance update.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Whether the member has any paid time left.
    pub fn has_balance(&self) -> bool {
        self.remaining_seconds > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_balance() {
        let mut member = Member {
            id: MemberId(1),
            username: "alice".to_string(),
            remaining_seconds: 3600,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(member.has_balance());

        member.remaining_seconds = 0;
        assert!(!member.has_balance());
    }
}
