//! SQLite persistence for plans, the exercise catalog and training history.
//!
//! Plans are stored as their JSON wire record next to a few indexed columns
//! (name, format, revision). Every write bumps `revision`; rewrites of an
//! existing plan are compare-and-swap updates against the revision the
//! caller read.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod catalog_queries;
pub mod history_queries;
pub mod plan_queries;
mod schema;

pub use plan_queries::PlanRecord;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
