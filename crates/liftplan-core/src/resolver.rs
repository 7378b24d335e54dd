//! Reconciliation of plan exercises against the exercise catalog.
//!
//! Resolution is best effort. Strategies are tried in a fixed order and the
//! first hit wins; an exercise no strategy can place keeps its original
//! reference and only produces a warning.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{CatalogExercise, WorkoutExercise, WorkoutPlan};

/// One way of locating a plan exercise in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Catalog entry with the same id. Only the muscle list is refreshed.
    ExactId,
    /// First catalog entry whose name contains the exercise name,
    /// ignoring case. Id, name and muscles are all re-pointed.
    NameContains,
}

impl ResolutionStrategy {
    /// Strategy order used unless a caller supplies its own.
    pub const DEFAULT_ORDER: [ResolutionStrategy; 2] =
        [ResolutionStrategy::ExactId, ResolutionStrategy::NameContains];

    /// Finds the catalog entry this strategy would resolve to.
    pub fn find<'c>(
        &self,
        exercise: &WorkoutExercise,
        catalog: &'c [CatalogExercise],
    ) -> Option<&'c CatalogExercise> {
        match self {
            ResolutionStrategy::ExactId => {
                catalog.iter().find(|entry| entry.id == exercise.exercise_id)
            }
            ResolutionStrategy::NameContains => {
                let needle = exercise.exercise_name.trim().to_lowercase();
                if needle.is_empty() {
                    return None;
                }
                catalog
                    .iter()
                    .find(|entry| entry.name.to_lowercase().contains(&needle))
            }
        }
    }

    fn apply(&self, exercise: &mut WorkoutExercise, entry: &CatalogExercise) {
        match self {
            ResolutionStrategy::ExactId => {
                exercise.primary_muscles = entry.primary_muscles.clone();
            }
            ResolutionStrategy::NameContains => {
                exercise.exercise_id = entry.id;
                exercise.exercise_name = entry.name.clone();
                exercise.primary_muscles = entry.primary_muscles.clone();
            }
        }
    }
}

/// Result of resolving a single exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        strategy: ResolutionStrategy,
        catalog_id: u64,
    },
    Unresolved,
}

/// Tally of a whole-plan resolution pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionReport {
    pub by_id: usize,
    pub by_name: usize,
    /// Names of exercises left untouched
    pub unresolved: Vec<String>,
}

impl ResolutionReport {
    fn record(&mut self, exercise_name: &str, resolution: Resolution) {
        match resolution {
            Resolution::Resolved {
                strategy: ResolutionStrategy::ExactId,
                ..
            } => self.by_id += 1,
            Resolution::Resolved {
                strategy: ResolutionStrategy::NameContains,
                ..
            } => self.by_name += 1,
            Resolution::Unresolved => self.unresolved.push(exercise_name.to_string()),
        }
    }
}

/// Resolver bound to a catalog and an ordered list of strategies.
pub struct ExerciseResolver<'c> {
    catalog: &'c [CatalogExercise],
    strategies: Vec<ResolutionStrategy>,
}

impl<'c> ExerciseResolver<'c> {
    pub fn new(catalog: &'c [CatalogExercise]) -> Self {
        Self::with_strategies(catalog, ResolutionStrategy::DEFAULT_ORDER.to_vec())
    }

    pub fn with_strategies(
        catalog: &'c [CatalogExercise],
        strategies: Vec<ResolutionStrategy>,
    ) -> Self {
        Self {
            catalog,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[ResolutionStrategy] {
        &self.strategies
    }

    /// Resolves one exercise in place.
    pub fn resolve_exercise(&self, exercise: &mut WorkoutExercise) -> Resolution {
        let hit = self.strategies.iter().find_map(|strategy| {
            strategy
                .find(exercise, self.catalog)
                .map(|entry| (*strategy, entry))
        });

        match hit {
            Some((strategy, entry)) => {
                debug!(
                    "resolved '{}' ({}) to catalog #{} via {:?}",
                    exercise.exercise_name, exercise.exercise_id, entry.id, strategy
                );
                strategy.apply(exercise, entry);
                Resolution::Resolved {
                    strategy,
                    catalog_id: entry.id,
                }
            }
            None => {
                warn!(
                    "exercise '{}' ({}) not found in catalog, keeping original reference",
                    exercise.exercise_name, exercise.exercise_id
                );
                Resolution::Unresolved
            }
        }
    }

    /// Resolves every exercise of `plan`.
    pub fn resolve_plan(&self, mut plan: WorkoutPlan) -> (WorkoutPlan, ResolutionReport) {
        let mut report = ResolutionReport::default();
        for exercise in plan.exercises_mut() {
            let resolution = self.resolve_exercise(exercise);
            report.record(&exercise.exercise_name, resolution);
        }
        (plan, report)
    }
}

/// Resolves every exercise of `plan` with the default strategy order.
pub fn resolve_exercises(plan: WorkoutPlan, catalog: &[CatalogExercise]) -> WorkoutPlan {
    ExerciseResolver::new(catalog).resolve_plan(plan).0
}
