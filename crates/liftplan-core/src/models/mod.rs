//! Data models for workout plans, training history and the exercise catalog.
//!
//! A plan travels in one of two wire formats:
//!
//! - **Legacy**: every [`WorkoutDay`] carries a flat `exercises` list.
//! - **Modular**: every [`WorkoutDay`] carries an ordered list of typed
//!   [`WorkoutModule`]s (warmup, main, core, cooldown).
//!
//! Inside the crate the two shapes are an explicit [`DayContent`] variant.
//! The `exercises`/`modules` keys only exist on the wire; deserializing a day
//! is the single point where field presence is turned into the variant.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use liftplan_core::models::{DayContent, PlanFormat, WorkoutPlan};
//! use serde_json::json;
//!
//! let plan = WorkoutPlan::from_value(json!({
//!     "name": "Full Body",
//!     "description": "Three days a week",
//!     "workouts": [{
//!         "day": "Monday",
//!         "name": "Day A",
//!         "exercises": [
//!             { "exercise_id": 1, "exercise_name": "Squat", "sets": 3, "reps": "5" }
//!         ]
//!     }]
//! }))?;
//!
//! assert_eq!(plan.format(), PlanFormat::Legacy);
//! assert!(matches!(plan.workouts[0].content, DayContent::Exercises(_)));
//! # Ok::<(), liftplan_core::PlanError>(())
//! ```

pub mod catalog;
pub mod exercise;
pub mod kinds;
pub mod module;
pub mod performance;
pub mod plan;
pub mod stored;


pub use catalog::CatalogExercise;
pub use exercise::{RepTarget, Reps, WorkoutExercise};
pub use kinds::{Difficulty, ModuleType, PlanFormat};
pub use module::WorkoutModule;
pub use performance::{
    Confidence, MAX_RIR, OneRepMaxEstimate, OneRepMaxFormula, PerformanceRecord, PerformanceSet,
};
pub use plan::{DayContent, WorkoutDay, WorkoutPlan};
pub use stored::{PlanSummary, StoredPlan};
