//! Core library for the liftplan workout planner.
//!
//! The crate covers the parts of a workout-planning application that carry
//! real invariants:
//!
//! - [`models`]: the plan data model in its legacy (flat) and modular (phased)
//!   wire formats, plus logged training sets
//! - [`format`] and [`validation`]: format detection and structural
//!   validation of untyped plan records
//! - [`convert`]: legacy and modular conversion in both directions
//! - [`resolver`]: reconciliation of plan exercises with an exercise catalog
//! - [`stats`]: summary metrics over a plan
//! - [`strength`]: one-rep-max estimation and load progression
//! - [`planner`]: async facade over SQLite persistence, including in-place
//!   migration of stored plans
//!
//! Pure functions in the first six modules never fail on malformed plan data;
//! they report problems as lists of messages. Only the persistence-backed
//! [`Planner`] returns [`PlanError`].
//!
//! # Quick Start
//!
//! ```rust
//! use liftplan_core::{models::PerformanceSet, strength, validation::validate};
//! use serde_json::json;
//!
//! let report = validate(&json!({ "name": "Empty", "description": "No days", "workouts": [] }));
//! assert!(!report.is_valid);
//!
//! let estimate = strength::estimate_one_rep_max(&PerformanceSet::new(100.0, 5, Some(0)));
//! assert_eq!(estimate.value, 116.67);
//! ```

pub mod convert;
pub mod db;
pub mod display;
pub mod error;
pub mod format;
pub mod models;
pub mod params;
pub mod planner;
pub mod resolver;
pub mod stats;
pub mod strength;
pub mod validation;

pub use db::Database;
pub use display::{LocalDateTime, OperationStatus, PlanSummaries};
pub use error::{PlanError, Result};
pub use models::{
    CatalogExercise, OneRepMaxEstimate, PerformanceSet, PlanFormat, PlanSummary, StoredPlan,
    WorkoutPlan,
};
pub use planner::{LoadRecommendation, MigrationOutcome, PlanResolution, Planner, PlannerBuilder};
pub use validation::ValidationReport;
