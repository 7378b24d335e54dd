//! Workout plan and day definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Difficulty, ModuleType, PlanFormat, WorkoutExercise, WorkoutModule};
use crate::error::Result;

/// A complete workout plan in either wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub name: String,

    pub description: String,

    #[serde(default)]
    pub duration_weeks: u32,

    #[serde(default)]
    pub days_per_week: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Goal tags such as "strength" or "hypertrophy"
    #[serde(default)]
    pub goals: Vec<String>,

    /// Training days in schedule order
    pub workouts: Vec<WorkoutDay>,

    /// Module types used by the plan (modular format only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_modules: Option<Vec<ModuleType>>,

    /// Explicit format marker written by the migration service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<PlanFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrated_at: Option<Timestamp>,
}

impl WorkoutPlan {
    /// Parses an untyped record into the typed model.
    ///
    /// This is the only way untyped data enters the model: each day is
    /// classified into [`DayContent`] by the presence of its `modules` or
    /// `exercises` key.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the plan back into its wire record.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Storage format of the plan. A plan with any flat day still needs
    /// migration and therefore counts as legacy.
    pub fn format(&self) -> PlanFormat {
        if self.workouts.iter().any(|day| !day.is_modular()) {
            PlanFormat::Legacy
        } else {
            PlanFormat::Modular
        }
    }

    /// Iterates every exercise in the plan, in day and module order as stored.
    pub fn exercises(&self) -> impl Iterator<Item = &WorkoutExercise> {
        self.workouts.iter().flat_map(WorkoutDay::exercises)
    }

    pub(crate) fn exercises_mut(&mut self) -> impl Iterator<Item = &mut WorkoutExercise> {
        self.workouts.iter_mut().flat_map(WorkoutDay::exercises_mut)
    }
}

/// One training session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawWorkoutDay", into = "RawWorkoutDay")]
pub struct WorkoutDay {
    /// Day label, e.g. "Monday" or "Day 1"
    pub day: String,

    pub name: String,

    pub description: String,

    /// Planned session length; estimated when absent
    pub total_duration_minutes: Option<u32>,

    pub content: DayContent,
}

/// The two mutually exclusive shapes of a day's content.
#[derive(Debug, Clone, PartialEq)]
pub enum DayContent {
    /// Legacy format: a flat exercise list
    Exercises(Vec<WorkoutExercise>),

    /// Modular format: ordered typed phases
    Modules(Vec<WorkoutModule>),
}

impl WorkoutDay {
    pub fn is_modular(&self) -> bool {
        matches!(self.content, DayContent::Modules(_))
    }

    pub fn modules(&self) -> &[WorkoutModule] {
        match &self.content {
            DayContent::Modules(modules) => modules,
            DayContent::Exercises(_) => &[],
        }
    }

    /// Iterates the day's exercises regardless of format.
    pub fn exercises(&self) -> Box<dyn Iterator<Item = &WorkoutExercise> + '_> {
        match &self.content {
            DayContent::Exercises(exercises) => Box::new(exercises.iter()),
            DayContent::Modules(modules) => Box::new(modules.iter().flat_map(|m| m.exercises.iter())),
        }
    }

    fn exercises_mut(&mut self) -> Box<dyn Iterator<Item = &mut WorkoutExercise> + '_> {
        match &mut self.content {
            DayContent::Exercises(exercises) => Box::new(exercises.iter_mut()),
            DayContent::Modules(modules) => {
                Box::new(modules.iter_mut().flat_map(|m| m.exercises.iter_mut()))
            }
        }
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises().count()
    }
}

/// Wire shape of a day, with both content keys optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawWorkoutDay {
    day: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exercises: Option<Vec<WorkoutExercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<WorkoutModule>>,
}

impl TryFrom<RawWorkoutDay> for WorkoutDay {
    type Error = String;

    fn try_from(raw: RawWorkoutDay) -> std::result::Result<Self, Self::Error> {
        let content = match (raw.modules, raw.exercises) {
            (Some(modules), _) => DayContent::Modules(modules),
            (None, Some(exercises)) => DayContent::Exercises(exercises),
            (None, None) => {
                return Err(format!(
                    "day '{}' has neither 'modules' nor 'exercises'",
                    raw.day
                ));
            }
        };

        Ok(Self {
            day: raw.day,
            name: raw.name,
            description: raw.description,
            total_duration_minutes: raw.total_duration_minutes,
            content,
        })
    }
}

impl From<WorkoutDay> for RawWorkoutDay {
    fn from(day: WorkoutDay) -> Self {
        let (exercises, modules) = match day.content {
            DayContent::Exercises(exercises) => (Some(exercises), None),
            DayContent::Modules(modules) => (None, Some(modules)),
        };

        Self {
            day: day.day,
            name: day.name,
            description: day.description,
            total_duration_minutes: day.total_duration_minutes,
            exercises,
            modules,
        }
    }
}
