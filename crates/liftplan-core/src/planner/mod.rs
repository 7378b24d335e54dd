//! High-level async API over plans, the exercise catalog and training history.
//!
//! [`Planner`] is the entry point used by every interface. It owns nothing but
//! the database path: each operation opens a fresh [`Database`] inside
//! `tokio::task::spawn_blocking`, does its work and drops the connection.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Save, revise, show, list, delete, stats and export
//! - [`migration`]: In-place legacy to modular migration of stored plans
//! - [`catalog_ops`]: Catalog import and plan resolution against it
//! - [`training_ops`]: Logged sets, one-rep-max lookup and load recommendations
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use liftplan_core::{PlannerBuilder, params::{Id, SavePlan}};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/liftplan.db"))
//!     .build()
//!     .await?;
//!
//! let stored = planner
//!     .save_plan(&SavePlan {
//!         plan: json!({
//!             "name": "Starter",
//!             "description": "Two days of basics",
//!             "workouts": [{
//!                 "day": "Monday",
//!                 "name": "Lower",
//!                 "exercises": [
//!                     { "exercise_id": 1, "exercise_name": "Squat", "sets": 3, "reps": 5 }
//!                 ]
//!             }]
//!         }),
//!     })
//!     .await?;
//!
//! let outcome = planner.migrate_plan(&Id { id: stored.id }).await;
//! assert!(outcome.success);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{PlanError, Result},
};

pub mod builder;
pub mod catalog_ops;
pub mod migration;
pub mod plan_ops;
pub mod training_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use catalog_ops::PlanResolution;
pub use migration::MigrationOutcome;
pub use training_ops::LoadRecommendation;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs `op` against a freshly opened database on the blocking pool.
    async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(PlanError::join_error)?
    }
}
