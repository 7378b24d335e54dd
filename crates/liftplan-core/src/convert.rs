//! Conversion between the legacy and modular plan formats.
//!
//! Legacy to modular keeps every exercise and wraps each flat day into a
//! synthetic main module between stub warm-up and cool-down phases. Modular to
//! legacy flattens modules in `order` and loses phase boundaries, so callers
//! that need module semantics must not round-trip through the legacy format.

use std::collections::BTreeSet;

use crate::models::{DayContent, ModuleType, WorkoutDay, WorkoutModule, WorkoutPlan};

/// Time-and-rest budget assumed per exercise when a duration is missing.
pub const MINUTES_PER_EXERCISE: f64 = 3.5;

/// Duration of the synthesized warm-up and cool-down modules.
pub const STUB_MODULE_MINUTES: u32 = 10;

pub const MAIN_MODULE_NAME: &str = "Main Workout";

/// Modules enabled on a plan produced from legacy data.
pub const CONVERTED_MODULES: [ModuleType; 3] =
    [ModuleType::Warmup, ModuleType::Main, ModuleType::Cooldown];

/// Estimated session length in whole minutes for a number of exercises.
pub fn estimate_duration(exercise_count: usize) -> u32 {
    (exercise_count as f64 * MINUTES_PER_EXERCISE).round() as u32
}

/// Planned duration of a day, estimated from its exercises when absent.
pub fn day_duration(day: &WorkoutDay) -> u32 {
    day.total_duration_minutes
        .unwrap_or_else(|| estimate_duration(day.exercise_count()))
}

/// Converts every legacy day of `plan` into the modular format.
///
/// Days that are already modular are left untouched.
pub fn to_modular(mut plan: WorkoutPlan) -> WorkoutPlan {
    let mut converted = false;

    for day in &mut plan.workouts {
        if let DayContent::Exercises(exercises) = &mut day.content {
            let exercises = std::mem::take(exercises);
            let main_minutes = estimate_duration(exercises.len());
            day.total_duration_minutes.get_or_insert(main_minutes);

            day.content = DayContent::Modules(vec![
                WorkoutModule {
                    module_type: ModuleType::Warmup,
                    name: "Warm-up".to_string(),
                    description: "General warm-up and mobility".to_string(),
                    duration_minutes: STUB_MODULE_MINUTES,
                    exercises: Vec::new(),
                    order: 0,
                },
                WorkoutModule {
                    module_type: ModuleType::Main,
                    name: MAIN_MODULE_NAME.to_string(),
                    description: day.description.clone(),
                    duration_minutes: main_minutes,
                    exercises,
                    order: 1,
                },
                WorkoutModule {
                    module_type: ModuleType::Cooldown,
                    name: "Cool-down".to_string(),
                    description: "Stretching and recovery".to_string(),
                    duration_minutes: STUB_MODULE_MINUTES,
                    exercises: Vec::new(),
                    order: 2,
                },
            ]);
            converted = true;
        }
    }

    if converted {
        let enabled: BTreeSet<ModuleType> = plan
            .enabled_modules
            .take()
            .unwrap_or_default()
            .into_iter()
            .chain(CONVERTED_MODULES)
            .collect();
        plan.enabled_modules = Some(enabled.into_iter().collect());
    }

    plan
}

/// Flattens every modular day of `plan` into a legacy exercise list.
///
/// Exercises are emitted by ascending module `order`. An exercise without
/// notes is tagged with its originating module as `"<name> - <description>"`.
pub fn to_legacy(mut plan: WorkoutPlan) -> WorkoutPlan {
    for day in &mut plan.workouts {
        if let DayContent::Modules(modules) = &mut day.content {
            let mut modules = std::mem::take(modules);
            modules.sort_by_key(|module| module.order);

            let exercises = modules
                .into_iter()
                .flat_map(|module| {
                    let provenance = if module.description.trim().is_empty() {
                        module.name.clone()
                    } else {
                        format!("{} - {}", module.name, module.description)
                    };
                    module.exercises.into_iter().map(move |mut exercise| {
                        if exercise.notes.as_deref().is_none_or(|n| n.trim().is_empty()) {
                            exercise.notes = Some(provenance.clone());
                        }
                        exercise
                    })
                })
                .collect();

            day.content = DayContent::Exercises(exercises);
        }
    }

    plan.enabled_modules = None;
    plan.workout_type = None;
    plan.format_version = None;
    plan.migrated_at = None;
    plan
}
