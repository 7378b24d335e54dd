//! Training history and load recommendation operations for the Planner.

use log::debug;
use serde::{Deserialize, Serialize};

use super::Planner;
use crate::{
    error::Result,
    models::{OneRepMaxEstimate, PerformanceRecord, PerformanceSet},
    params::{Id, LogSet, RecommendLoad},
    strength::{Progression, best_one_rep_max, suggest_progression, suggest_weight},
};

/// History-based working-weight recommendation for one exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRecommendation {
    pub exercise_id: u64,
    /// Best estimate over the logged history
    pub one_rep_max: OneRepMaxEstimate,
    /// Suggestion from the one-rep max alone
    pub baseline: f64,
    /// Baseline adjusted by the recent trend
    pub progression: Progression,
}

fn performance_sets(records: &[PerformanceRecord]) -> Vec<PerformanceSet> {
    records.iter().map(|record| record.set).collect()
}

impl Planner {
    /// Validates and stores a performed set.
    pub async fn log_set(&self, params: &LogSet) -> Result<PerformanceRecord> {
        let set = params.validate()?;
        let exercise_id = params.exercise_id;

        self.with_database(move |db| db.insert_set(exercise_id, set))
            .await
    }

    /// Full logged history of an exercise, oldest first.
    pub async fn exercise_history(&self, params: &Id) -> Result<Vec<PerformanceRecord>> {
        let exercise_id = params.id;
        self.with_database(move |db| db.sets_for_exercise(exercise_id))
            .await
    }

    /// Best one-rep-max estimate across an exercise's logged sets.
    pub async fn best_one_rep_max(&self, params: &Id) -> Result<Option<OneRepMaxEstimate>> {
        let history = self.exercise_history(params).await?;
        Ok(best_one_rep_max(&performance_sets(&history)))
    }

    /// Recommends a working weight for a rep prescription.
    ///
    /// Returns `None` when the exercise has no usable logged sets.
    pub async fn recommend_load(&self, params: &RecommendLoad) -> Result<Option<LoadRecommendation>> {
        let (target, target_rir) = params.validate()?;
        let history = self.exercise_history(&Id { id: params.exercise_id }).await?;
        let sets = performance_sets(&history);

        let Some(one_rep_max) = best_one_rep_max(&sets) else {
            debug!(
                "No usable history for exercise {}, skipping recommendation",
                params.exercise_id
            );
            return Ok(None);
        };

        let baseline = suggest_weight(one_rep_max.value, target, target_rir);
        let progression = suggest_progression(&sets, baseline, target);

        Ok(Some(LoadRecommendation {
            exercise_id: params.exercise_id,
            one_rep_max,
            baseline,
            progression,
        }))
    }
}
