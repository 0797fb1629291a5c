//! Wire format for terminal command frames.

use serde::{Deserialize, Serialize};

use seathub_core::error::AppError;
use seathub_core::types::id::{MemberId, SeatNumber};

/// A command frame received from a terminal.
///
/// Frames are JSON objects discriminated by a `command` field, e.g.
/// `{"command": "assign", "user_id": 42, "seat_number": 7}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum TerminalCommand {
    /// Start a timed session on a seat.
    Assign {
        user_id: MemberId,
        seat_number: SeatNumber,
    },
    /// Hold a seat without starting the clock.
    Reserve {
        user_id: MemberId,
        seat_number: SeatNumber,
    },
    /// Give a seat back.
    Release {
        user_id: MemberId,
        seat_number: SeatNumber,
    },
}

/// Reply sent back for each command frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandReply {
    /// The command succeeded.
    Ok,
    /// The command failed.
    Error { code: String, message: String },
}

impl CommandReply {
    /// Build an error reply from a failed operation.
    pub fn from_error(error: &AppError) -> Self {
        Self::Error {
            code: error.kind.to_string(),
            message: error.message.clone(),
        }
    }
}
