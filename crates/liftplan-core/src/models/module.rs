//! Workout module (one phase of a training day).

use serde::{Deserialize, Serialize};

use super::{ModuleType, WorkoutExercise};

/// A typed phase within a modular day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutModule {
    /// Phase tag (warmup, main, core, cooldown)
    #[serde(rename = "type")]
    pub module_type: ModuleType,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Planned duration of the phase
    #[serde(default)]
    pub duration_minutes: u32,

    /// Exercises in insertion order
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,

    /// Position of the module within its day (0-indexed, gapless)
    pub order: u32,
}
