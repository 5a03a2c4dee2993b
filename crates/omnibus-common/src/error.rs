//! Common error types used throughout omnibus.
//!
//! One enum covers every failure the data-access layer can surface: field
//! validation, key collisions, missing records, and backend faults. All
//! variants are recoverable by the caller; none terminate the process.

use crate::kinds::EntityKind;

/// Common error type for omnibus.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A supplied field is missing, empty, or has the wrong shape.
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    /// An insert targeted a title that already exists for the kind.
    #[error("{kind} '{title}' already exists")]
    Conflict { kind: EntityKind, title: String },

    /// The requested record does not exist.
    #[error("{kind} '{title}' not found")]
    NotFound { kind: EntityKind, title: String },

    /// The storage backend could not provide a connection.
    #[error("Storage backend unavailable: {0}")]
    Backend(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal invariant was breached.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Validation failure for a required field that is absent or empty.
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: "Data not provided.".to_string(),
        }
    }

    /// Validation failure with a custom message.
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Key collision on insert.
    pub fn conflict<S: Into<String>>(kind: EntityKind, title: S) -> Self {
        Self::Conflict {
            kind,
            title: title.into(),
        }
    }

    /// Record lookup miss.
    pub fn not_found<S: Into<String>>(kind: EntityKind, title: S) -> Self {
        Self::NotFound {
            kind,
            title: title.into(),
        }
    }

    /// Create a new Backend error.
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
