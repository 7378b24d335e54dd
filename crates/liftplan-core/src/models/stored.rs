//! Persisted plan records and their summaries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, PlanFormat, WorkoutPlan};

/// A plan as held by the store, with its bookkeeping columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Storage format recorded alongside the payload
    pub format: PlanFormat,

    /// Write counter used for compare-and-swap updates
    pub revision: u64,

    /// Timestamp when the plan was first saved (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the latest write (UTC)
    pub updated_at: Timestamp,

    pub plan: WorkoutPlan,
}

/// Compact listing entry for a stored plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: u64,
    pub name: String,
    pub format: PlanFormat,
    pub difficulty: Difficulty,
    pub days: usize,
    pub total_exercises: usize,
    pub updated_at: Timestamp,
}

impl From<&StoredPlan> for PlanSummary {
    fn from(stored: &StoredPlan) -> Self {
        Self {
            id: stored.id,
            name: stored.plan.name.clone(),
            format: stored.format,
            difficulty: stored.plan.difficulty,
            days: stored.plan.workouts.len(),
            total_exercises: stored.plan.exercises().count(),
            updated_at: stored.updated_at,
        }
    }
}
