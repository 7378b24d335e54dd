//! Error types for the liftplan library.
//!
//! Only infrastructure failures and refused writes are errors. Structural
//! problems in plan data are reported as lists of messages by the validator
//! and the migration service instead.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all store-backed plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A plan failed validation and was not persisted
    #[error("Plan failed validation: {}", .errors.join("; "))]
    InvalidPlan { errors: Vec<String> },
    /// A compare-and-swap write found a newer revision in the store
    #[error("Plan with ID {id} was modified concurrently (expected revision {expected})")]
    RevisionConflict { id: u64, expected: u64 },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanError {
        PlanError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub(crate) fn join_error(e: tokio::task::JoinError) -> Self {
        PlanError::Configuration {
            message: format!("Task join error: {e}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::database(message).with_source(e))
    }
}

/// Result type alias for liftplan operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_plan_lists_every_error() {
        let error = PlanError::InvalidPlan {
            errors: vec!["Plan name is required".to_string(), "Day 1: name is required".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Plan failed validation: Plan name is required; Day 1: name is required"
        );
    }

    #[test]
    fn test_invalid_input_builder() {
        let error = PlanError::invalid_input("rir").with_reason("must be between 0 and 10");
        assert!(matches!(error, PlanError::InvalidInput { ref field, .. } if field == "rir"));
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'rir': must be between 0 and 10"
        );
    }
}
