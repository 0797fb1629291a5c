//! Newtype wrappers for all domain entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `MemberId` where a
//! `SeatNumber` is expected. Seats and members use the integer primary
//! keys assigned by storage; connections use random UUIDs minted by the
//! realtime layer. When the `sqlx` feature is enabled, the integer ID
//! types also implement `sqlx::Type`, `sqlx::Encode`, and `sqlx::Decode`
//! for PostgreSQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around a storage-assigned integer.
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Create an identifier from a raw storage key.
            pub fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Return the inner integer value.
            pub fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$inner>().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> $inner {
                id.0
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <$inner as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <$inner as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <$inner as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

define_int_id!(
    /// Unique identifier for a facility member.
    MemberId(i64)
);

define_int_id!(
    /// Stable number of a physical seat, unique within the registry.
    SeatNumber(i32)
);

/// Unique identifier for one live client connection.
///
/// The seat layer only ever routes by this id; the connection itself is
/// owned by the realtime layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Mint a new random connection identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId::new(42).to_string(), "42");
    }

    #[test]
    fn test_seat_number_from_str() {
        let n: SeatNumber = "7".parse().expect("should parse");
        assert_eq!(n, SeatNumber(7));
    }

    #[test]
    fn test_seat_number_ordering() {
        assert!(SeatNumber(3) < SeatNumber(10));
    }

    #[test]
    fn test_connection_id_unique() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&MemberId(5)).expect("serialize");
        assert_eq!(json, "5");
        let parsed: MemberId = serde_json::from_str("5").expect("deserialize");
        assert_eq!(parsed, MemberId(5));
    }
}
