//! Session commands pushed to seat terminals.

use serde::{Deserialize, Serialize};

/// Control commands the server pushes to a terminal over its connection.
///
/// The wire form is a JSON object tagged by a `command` field; the only
/// command the session core emits today is `{"command":"logout"}` when an
/// occupant's paid time runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// The occupant's remaining time is exhausted; the terminal must end
    /// the session.
    Logout,
}
