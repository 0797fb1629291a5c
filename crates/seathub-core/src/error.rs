//! Unified application error types for SeatHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested seat number is not part of the registry. Seat numbers
    /// are fixed at deploy time, so this is always a caller bug.
    SeatNotFound,
    /// An assign or reserve was attempted on a seat that is not empty.
    SeatOccupied,
    /// The member referenced by the request does not exist in storage.
    UserNotFound,
    /// A release was attempted by someone other than the seat's occupant.
    OccupantMismatch,
    /// A database read or write failed.
    Database,
    /// Delivering a message to a client connection failed. Callers treat
    /// this as expected and never propagate it past a log line.
    Notification,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// The seat registry could not be built at startup. Fatal.
    Initialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeatNotFound => write!(f, "SEAT_NOT_FOUND"),
            Self::SeatOccupied => write!(f, "SEAT_OCCUPIED"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::OccupantMismatch => write!(f, "OCCUPANT_MISMATCH"),
            Self::Database => write!(f, "DATABASE"),
            Self::Notification => write!(f, "NOTIFICATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Initialization => write!(f, "INITIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout SeatHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Callers that need to distinguish the
/// expected, recoverable failures (occupied seat, unknown member, occupant
/// mismatch) match on [`AppError::kind`].
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a seat-not-found error.
    pub fn seat_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatNotFound, message)
    }

    /// Create a seat-occupied error.
    pub fn seat_occupied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatOccupied, message)
    }

    /// Create a user-not-found error.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserNotFound, message)
    }

    /// Create an occupant-mismatch error.
    pub fn occupant_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OccupantMismatch, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a notification delivery error.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Notification, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an initialization error.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Initialization, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
