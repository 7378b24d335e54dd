//! Format-agnostic summary metrics over a plan.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    convert::day_duration,
    models::{WorkoutDay, WorkoutPlan},
};

/// Summary metrics of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanStats {
    pub total_exercises: usize,
    /// Always zero for legacy days
    pub total_modules: usize,
    /// Mean day duration in minutes, rounded
    pub average_duration: u32,
    /// Distinct primary muscle names, compared as authored
    pub unique_muscle_groups: usize,
}

#[derive(Default)]
struct StatsAccumulator<'a> {
    exercises: usize,
    modules: usize,
    minutes: u64,
    days: usize,
    muscles: BTreeSet<&'a str>,
}

impl<'a> StatsAccumulator<'a> {
    fn add_day(mut self, day: &'a WorkoutDay) -> Self {
        self.days += 1;
        self.modules += day.modules().len();
        self.minutes += u64::from(day_duration(day));
        for exercise in day.exercises() {
            self.exercises += 1;
            self.muscles
                .extend(exercise.primary_muscles.iter().map(String::as_str));
        }
        self
    }

    fn finish(self) -> PlanStats {
        let average_duration = if self.days == 0 {
            0
        } else {
            (self.minutes as f64 / self.days as f64).round() as u32
        };

        PlanStats {
            total_exercises: self.exercises,
            total_modules: self.modules,
            average_duration,
            unique_muscle_groups: self.muscles.len(),
        }
    }
}

/// Computes summary metrics for a plan in either format.
///
/// Days without a recorded duration contribute their estimated duration.
pub fn compute_stats(plan: &WorkoutPlan) -> PlanStats {
    plan.workouts
        .iter()
        .fold(StatsAccumulator::default(), StatsAccumulator::add_day)
        .finish()
}
